//! On-disk layout of a style directory.
//!
//! ```text
//! <styles>/<style>/<descriptor>.json
//! <styles>/<style>/themes/*.xml
//! <styles>/<style>/resources/*.svg
//! <styles>/<style>/fonts/**/*.ttf
//! ```
//!
//! The names and extensions above are the defaults. Embedders that ship
//! styles in a different shape override them on [`StyleLayout`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Well known subdirectories of a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Theme XML files.
    Themes,
    /// SVG resource templates.
    ResourceTemplates,
    /// Font files.
    Fonts,
}

/// Directory names and file extensions used when reading a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleLayout {
    pub descriptor_extension: String,
    pub themes_dir: String,
    pub theme_extension: String,
    pub resources_dir: String,
    pub resource_extension: String,
    pub fonts_dir: String,
    pub font_extension: String,
}

impl Default for StyleLayout {
    fn default() -> Self {
        Self {
            descriptor_extension: "json".to_string(),
            themes_dir: "themes".to_string(),
            theme_extension: "xml".to_string(),
            resources_dir: "resources".to_string(),
            resource_extension: "svg".to_string(),
            fonts_dir: "fonts".to_string(),
            font_extension: "ttf".to_string(),
        }
    }
}

impl StyleLayout {
    /// Returns the directory for `location` inside `style_dir`.
    pub fn path(&self, style_dir: &Path, location: Location) -> PathBuf {
        let name = match location {
            Location::Themes => &self.themes_dir,
            Location::ResourceTemplates => &self.resources_dir,
            Location::Fonts => &self.fonts_dir,
        };
        style_dir.join(name)
    }

    /// File name of a theme within the themes directory.
    pub fn theme_file_name(&self, theme: &str) -> String {
        format!("{}.{}", theme, self.theme_extension)
    }
}

/// True if `path` has the given extension, ignoring ASCII case.
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Lists regular files directly inside `dir` with the given extension,
/// sorted by file name. A missing or unreadable directory yields an empty list.
pub(crate) fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| has_extension(path, extension))
        .collect();
    files.sort();
    files
}

/// Lists subdirectory names of `dir`, sorted. Missing directories yield an
/// empty list.
pub(crate) fn subdirectory_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}

/// File stem as an owned string.
pub(crate) fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().and_then(OsStr::to_str).map(str::to_string)
}
