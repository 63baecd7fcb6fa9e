//! Theme files.
//!
//! A theme is an XML file in the style's themes directory that assigns a
//! value to each theme color:
//!
//! ```xml
//! <resources dark="1">
//!     <color name="primaryColor">#1de9b6</color>
//!     <color name="backgroundColor">#232629</color>
//! </resources>
//! ```
//!
//! The theme name is the file name without its extension.

mod xml;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::StyleError;
use crate::layout::{file_stem, files_with_extension, StyleLayout};

pub use xml::{parse_theme, ThemeDescriptor};

/// Loads `<themes_dir>/<name>.<ext>`.
///
/// # Errors
///
/// Returns a theme descriptor error if the file cannot be read or is not a
/// valid theme.
pub fn load_theme(themes_dir: &Path, name: &str, layout: &StyleLayout) -> Result<ThemeDescriptor, StyleError> {
    let path = themes_dir.join(layout.theme_file_name(name));
    debug!(path = %path.display(), "Loading theme");

    let source = fs::read_to_string(&path)
        .map_err(|e| StyleError::theme(&path, format!("cannot read theme file: {}", e)))?;
    parse_theme(&source).map_err(|message| StyleError::theme(&path, format!("malformed theme file: {}", message)))
}

/// Lists theme names in `themes_dir`, sorted.
pub fn list_themes(themes_dir: &Path, layout: &StyleLayout) -> Vec<String> {
    files_with_extension(themes_dir, &layout.theme_extension)
        .iter()
        .filter_map(|path| file_stem(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_list() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("light_blue.xml"),
            r#"<resources><color name="primaryColor">#2196f3</color></resources>"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("dark_teal.xml"),
            r#"<resources dark="1"><color name="primaryColor">#1de9b6</color></resources>"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let layout = StyleLayout::default();
        assert_eq!(list_themes(temp_dir.path(), &layout), vec!["dark_teal", "light_blue"]);

        let theme = load_theme(temp_dir.path(), "dark_teal", &layout).unwrap();
        assert!(theme.is_dark);
        assert_eq!(theme.colors["primaryColor"], "#1de9b6");
    }

    #[test]
    fn test_missing_theme_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_theme(temp_dir.path(), "nope", &StyleLayout::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ThemeDescriptor);
        assert!(err.to_string().contains("nope.xml"));
    }

    #[test]
    fn test_malformed_theme_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.xml"), "<theme/>").unwrap();
        let err = load_theme(temp_dir.path(), "bad", &StyleLayout::default()).unwrap_err();
        assert!(err.to_string().contains("malformed theme file"));
    }
}
