//! The style pipeline orchestrator.
//!
//! [`StyleManager`] owns the selected style, the selected theme and the
//! variable store built from them, and drives generation of the palette,
//! the SVG resource variants and the stylesheet.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──set_current_style──▶ StyleSelected
//!                                         │ set_current_theme
//!                                         ▼
//!                                      ThemeSelected ──regenerate──▶ Generated
//! ```
//!
//! Selecting a style resets the theme. Selecting a theme only merges its
//! colors; nothing is written to disk until [`StyleManager::regenerate`].
//! A failed operation leaves the previous state in place and is recorded in
//! [`StyleManager::last_error`] until the next operation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tinct::{StyleEvent, StyleManager};
//!
//! let mut manager = StyleManager::builder()
//!     .styles_dir("styles")
//!     .output_dir("output")
//!     .build();
//!
//! manager.subscribe(|event| {
//!     if *event == StyleEvent::StylesheetChanged {
//!         println!("reload stylesheet");
//!     }
//! });
//!
//! manager.set_current_style("qt_material")?;
//! manager.set_default_theme()?;
//! manager.regenerate()?;
//! println!("{}", manager.stylesheet());
//! # Ok::<(), tinct::StyleError>(())
//! ```

mod builder;
mod events;

pub use builder::{StyleManagerBuilder, DEFAULT_OUTPUT_DIR};
pub use events::{ListenerFn, ListenerId, Listeners, StyleEvent};

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ErrorKind, LastError, StyleError};
use crate::fonts::register_fonts;
use crate::host::{FontRegistrar, PaletteTarget};
use crate::icons::{IconId, IconRegistry};
use crate::layout::{files_with_extension, subdirectory_names, Location, StyleLayout};
use crate::palette::{build_palette, Color, Palette};
use crate::resources::generate_resources;
use crate::style::{load_descriptor, StyleDescriptor};
use crate::svg::{self, resolve_color_replace_list, ColorReplaceList};
use crate::template::process_template;
use crate::theme::{list_themes, load_theme};
use crate::vars::{VariableStore, Variables};

/// Progress through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PipelineState {
    #[default]
    Uninitialized,
    StyleSelected,
    ThemeSelected,
    Generated,
}

/// Loads styles and themes and generates stylesheets, palettes and icons.
///
/// Not thread safe: listeners are reference counted closures. Wrap the
/// manager yourself if it must be shared.
pub struct StyleManager {
    styles_dir: PathBuf,
    output_dir: PathBuf,
    layout: StyleLayout,
    styles: Vec<String>,
    themes: Vec<String>,
    current_style: Option<String>,
    current_theme: Option<String>,
    descriptor: Option<StyleDescriptor>,
    vars: VariableStore,
    is_dark: bool,
    stylesheet: String,
    state: PipelineState,
    last_error: LastError,
    icon_search_paths: Vec<PathBuf>,
    icon_colors: Option<ColorReplaceList>,
    icons: IconRegistry,
    listeners: Listeners,
    fonts: Box<dyn FontRegistrar>,
    palette: Box<dyn PaletteTarget>,
}

impl Default for StyleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleManager {
    /// Creates a manager with no styles directory and no GUI attached.
    pub fn new() -> Self {
        StyleManagerBuilder::new().build()
    }

    pub fn builder() -> StyleManagerBuilder {
        StyleManagerBuilder::new()
    }

    pub(crate) fn from_parts(
        output_dir: PathBuf,
        layout: StyleLayout,
        fonts: Box<dyn FontRegistrar>,
        palette: Box<dyn PaletteTarget>,
    ) -> Self {
        Self {
            styles_dir: PathBuf::new(),
            output_dir,
            layout,
            styles: Vec::new(),
            themes: Vec::new(),
            current_style: None,
            current_theme: None,
            descriptor: None,
            vars: VariableStore::new(),
            is_dark: false,
            stylesheet: String::new(),
            state: PipelineState::Uninitialized,
            last_error: LastError::default(),
            icon_search_paths: Vec::new(),
            icon_colors: None,
            icons: IconRegistry::new(),
            listeners: Listeners::new(),
            fonts,
            palette,
        }
    }

    // ------------------------------------------------------------------
    // Directories and catalog
    // ------------------------------------------------------------------

    /// Sets the styles root and lists its subdirectories as styles.
    ///
    /// No descriptor is parsed. Calling again rescans.
    pub fn set_styles_dir(&mut self, path: impl Into<PathBuf>) {
        self.styles_dir = path.into();
        self.styles = subdirectory_names(&self.styles_dir);
        debug!(dir = %self.styles_dir.display(), count = self.styles.len(), "Scanned styles");
    }

    pub fn styles_dir(&self) -> &Path {
        &self.styles_dir
    }

    /// Available style names, sorted.
    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn set_output_dir(&mut self, path: impl Into<PathBuf>) {
        self.output_dir = path.into();
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Themes of the current style, sorted.
    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    pub fn current_style(&self) -> Option<&str> {
        self.current_style.as_deref()
    }

    pub fn current_theme(&self) -> Option<&str> {
        self.current_theme.as_deref()
    }

    /// The current style's default theme.
    pub fn default_theme(&self) -> Option<&str> {
        self.descriptor.as_ref().map(|d| d.default_theme.as_str())
    }

    pub fn is_current_theme_dark(&self) -> bool {
        self.is_dark
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// `<styles>/<current style>`.
    pub fn current_style_path(&self) -> Option<PathBuf> {
        self.current_style.as_ref().map(|s| self.styles_dir.join(s))
    }

    /// `<output>/<current style>`.
    pub fn current_style_output_path(&self) -> Option<PathBuf> {
        self.current_style.as_ref().map(|s| self.output_dir.join(s))
    }

    /// A well known directory of the current style.
    pub fn path(&self, location: Location) -> Option<PathBuf> {
        self.current_style_path()
            .map(|dir| self.layout.path(&dir, location))
    }

    pub fn layout(&self) -> &StyleLayout {
        &self.layout
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects a style by directory name.
    ///
    /// Loads the style's descriptor, lists its themes, resets the variable
    /// store to the style's variables and clears the current theme. Fonts
    /// shipped with the style are registered, and listeners receive
    /// [`StyleEvent::StyleChanged`] followed by
    /// [`StyleEvent::StylesheetChanged`].
    ///
    /// # Errors
    ///
    /// Returns a style descriptor error if the descriptor is missing,
    /// ambiguous or invalid. Nothing changes and no event is emitted in that
    /// case.
    pub fn set_current_style(&mut self, name: &str) -> Result<(), StyleError> {
        self.clear_error();
        let style_dir = self.styles_dir.join(name);
        let descriptor = match load_descriptor(&style_dir, &self.layout) {
            Ok(descriptor) => descriptor,
            Err(err) => return Err(self.fail(err)),
        };

        self.themes = list_themes(&self.layout.path(&style_dir, Location::Themes), &self.layout);
        self.vars = VariableStore::with_style_variables(descriptor.variables.clone());
        self.descriptor = Some(descriptor);
        self.current_style = Some(name.to_string());
        self.current_theme = None;
        self.is_dark = false;
        self.icon_colors = None;
        self.state = PipelineState::StyleSelected;

        let output = self.output_dir.join(name);
        if !self.icon_search_paths.contains(&output) {
            self.icon_search_paths.push(output);
        }
        register_fonts(
            &self.layout.path(&style_dir, Location::Fonts),
            &self.layout.font_extension,
            self.fonts.as_mut(),
        );

        info!(style = %name, themes = self.themes.len(), "Style selected");
        self.listeners.emit(&StyleEvent::StyleChanged(name.to_string()));
        self.listeners.emit(&StyleEvent::StylesheetChanged);
        Ok(())
    }

    /// Selects a theme of the current style.
    ///
    /// Replaces the theme layer of the variable store, discarding any
    /// overrides, and emits [`StyleEvent::ThemeChanged`]. Nothing is
    /// regenerated.
    ///
    /// # Errors
    ///
    /// Returns a style descriptor error if no style is selected, or a theme
    /// descriptor error if the theme file is missing or invalid.
    pub fn set_current_theme(&mut self, name: &str) -> Result<(), StyleError> {
        self.clear_error();
        let Some(themes_dir) = self.loaded_style_path().map(|dir| self.layout.path(&dir, Location::Themes)) else {
            return Err(self.fail(StyleError::descriptor("no style selected")));
        };

        let theme = match load_theme(&themes_dir, name, &self.layout) {
            Ok(theme) => theme,
            Err(err) => return Err(self.fail(err)),
        };

        self.vars.set_theme_colors(theme.colors);
        self.is_dark = theme.is_dark;
        self.current_theme = Some(name.to_string());
        self.icon_colors = None;
        self.state = PipelineState::ThemeSelected;

        info!(theme = %name, dark = self.is_dark, "Theme selected");
        self.listeners.emit(&StyleEvent::ThemeChanged(name.to_string()));
        Ok(())
    }

    /// Selects the theme the descriptor names as default.
    pub fn set_default_theme(&mut self) -> Result<(), StyleError> {
        let Some(theme) = self.default_theme().map(str::to_string) else {
            self.clear_error();
            return Err(self.fail(StyleError::descriptor("no style selected")));
        };
        self.set_current_theme(&theme)
    }

    fn loaded_style_path(&self) -> Option<PathBuf> {
        self.descriptor.as_ref().and(self.current_style_path())
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Resolved value of a variable, empty if unknown.
    pub fn theme_variable_value(&self, name: &str) -> &str {
        self.vars.value(name)
    }

    /// Overrides a variable until the next theme selection.
    pub fn set_theme_variable_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.set_value(name, value);
    }

    /// A theme color. Style variables are not consulted.
    pub fn theme_color(&self, name: &str) -> Option<Color> {
        self.vars.color_of(name)
    }

    /// Colors of the current theme.
    pub fn theme_color_variables(&self) -> &Variables {
        self.vars.theme_colors()
    }

    pub fn variables(&self) -> &VariableStore {
        &self.vars
    }

    /// The descriptor of the current style.
    pub fn descriptor(&self) -> Option<&StyleDescriptor> {
        self.descriptor.as_ref()
    }

    /// The raw descriptor JSON of the current style.
    pub fn style_parameters(&self) -> Option<&Value> {
        self.descriptor.as_ref().map(|d| &d.raw)
    }

    /// Absolute path of the style icon, if the descriptor declares one.
    pub fn style_icon_path(&self) -> Option<PathBuf> {
        let icon = self.descriptor.as_ref()?.icon.as_ref()?;
        self.current_style_path().map(|dir| dir.join(icon))
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Builds the palette for the current theme without applying it.
    ///
    /// Starts from the host's current palette.
    pub fn generate_theme_palette(&self) -> Palette {
        let current = self.palette.current_palette();
        match &self.descriptor {
            Some(descriptor) => build_palette(
                &current,
                &descriptor.palette_rules,
                descriptor.palette_base_color.as_deref(),
                &self.vars,
            ),
            None => current,
        }
    }

    /// Builds the palette and hands it to the host.
    pub fn update_application_palette(&mut self) {
        let palette = self.generate_theme_palette();
        self.palette.apply_palette(&palette);
        debug!("Application palette updated");
    }

    /// The host's palette target.
    pub fn palette_target(&self) -> &dyn PaletteTarget {
        self.palette.as_ref()
    }

    /// Writes every resource variant of the current style.
    ///
    /// All variants are attempted; the first failure is returned.
    pub fn generate_resources(&mut self) -> Result<Vec<PathBuf>, StyleError> {
        self.clear_error();
        let result = self.run_resources();
        self.record(result)
    }

    fn run_resources(&self) -> Result<Vec<PathBuf>, StyleError> {
        let (Some(descriptor), Some(style_dir), Some(output)) = (
            self.descriptor.as_ref(),
            self.current_style_path(),
            self.current_style_output_path(),
        ) else {
            return Err(StyleError::descriptor("no style selected"));
        };

        let templates = files_with_extension(
            &self.layout.path(&style_dir, Location::ResourceTemplates),
            &self.layout.resource_extension,
        );
        debug!(count = templates.len(), "Generating resources");
        let report = generate_resources(descriptor.resource_variants.as_ref(), &templates, &output, &self.vars);
        report.into_result()
    }

    /// Updates the palette and generates resources, without the stylesheet.
    pub fn process_style_template(&mut self) -> Result<(), StyleError> {
        self.update_application_palette();
        self.generate_resources().map(|_| ())
    }

    /// Runs the full pipeline for the current theme.
    ///
    /// Applies the palette, re-renders live icons, writes resource variants,
    /// then processes and exports the stylesheet if the style declares a
    /// template. Stages run even if an earlier one failed; the first error is
    /// returned. On success the state becomes [`PipelineState::Generated`]
    /// and listeners receive [`StyleEvent::StylesheetChanged`].
    ///
    /// # Errors
    ///
    /// Returns a style descriptor error if no theme is selected, otherwise
    /// the first error from resource generation or stylesheet processing.
    pub fn regenerate(&mut self) -> Result<(), StyleError> {
        self.clear_error();
        if self.state < PipelineState::ThemeSelected {
            return Err(self.fail(StyleError::descriptor("no theme selected")));
        }

        self.update_application_palette();
        self.icon_colors = None;
        self.refresh_icons();

        let resources = self.run_resources().map(|_| ());
        let stylesheet = self.generate_stylesheet();
        if let Err(err) = resources.and(stylesheet) {
            return Err(self.fail(err));
        }

        self.state = PipelineState::Generated;
        info!(
            style = self.current_style.as_deref().unwrap_or_default(),
            theme = self.current_theme.as_deref().unwrap_or_default(),
            "Stylesheet regenerated"
        );
        self.listeners.emit(&StyleEvent::StylesheetChanged);
        Ok(())
    }

    /// Same as [`regenerate`](Self::regenerate).
    pub fn update_stylesheet(&mut self) -> Result<(), StyleError> {
        self.regenerate()
    }

    fn generate_stylesheet(&mut self) -> Result<(), StyleError> {
        let Some(template_name) = self.descriptor.as_ref().and_then(|d| d.css_template.clone()) else {
            debug!("Style declares no stylesheet template");
            return Ok(());
        };
        let Some(style_dir) = self.current_style_path() else {
            return Err(StyleError::descriptor("no style selected"));
        };

        let template_path = style_dir.join(&template_name);
        let template = fs::read_to_string(&template_path).map_err(|e| {
            StyleError::template(format!(
                "cannot read stylesheet template {}: {}",
                template_path.display(),
                e
            ))
        })?;

        self.stylesheet = process_template(&template, &self.vars)?;
        self.store_stylesheet(&self.stylesheet, &stylesheet_file_name(&template_name))?;
        Ok(())
    }

    fn store_stylesheet(&self, stylesheet: &str, file_name: &str) -> Result<PathBuf, StyleError> {
        let Some(dir) = self.current_style_output_path() else {
            return Err(StyleError::descriptor("no style selected"));
        };
        fs::create_dir_all(&dir).map_err(|source| StyleError::Export {
            path: dir.clone(),
            source,
        })?;
        let path = dir.join(file_name);
        fs::write(&path, stylesheet).map_err(|source| StyleError::Export {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Stylesheet exported");
        Ok(path)
    }

    /// The last generated stylesheet, empty before the first generation.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Processes an arbitrary template against the current variables.
    ///
    /// If `output_file` is given, the result is also written to that file
    /// name inside the current style's output directory.
    pub fn process_stylesheet_template(
        &mut self,
        template: &str,
        output_file: Option<&str>,
    ) -> Result<String, StyleError> {
        self.clear_error();
        let result = process_template(template, &self.vars).and_then(|text| {
            if let Some(file_name) = output_file {
                self.store_stylesheet(&text, file_name)?;
            }
            Ok(text)
        });
        self.record(result)
    }

    // ------------------------------------------------------------------
    // Icons
    // ------------------------------------------------------------------

    /// Replace list built from the descriptor's `icon_colors`.
    ///
    /// Built on first use and cached until the style or theme changes or the
    /// stylesheet is regenerated.
    pub fn icon_color_list(&mut self) -> &ColorReplaceList {
        let descriptor = self.descriptor.as_ref();
        let vars = &self.vars;
        self.icon_colors.get_or_insert_with(|| {
            descriptor
                .map(|d| resolve_color_replace_list(&d.icon_colors, vars))
                .unwrap_or_default()
        })
    }

    /// Replaces colors in SVG content.
    ///
    /// Uses `list` when given and non empty, the icon color list otherwise.
    pub fn replace_svg_colors(&mut self, content: &[u8], list: Option<&[(String, String)]>) -> Vec<u8> {
        match list {
            Some(list) if !list.is_empty() => svg::replace_svg_colors(content, list),
            _ => svg::replace_svg_colors(content, self.icon_color_list()),
        }
    }

    /// Registers an SVG file as a theme aware icon.
    pub fn load_theme_aware_svg_icon(&mut self, path: &Path) -> io::Result<IconId> {
        let id = self.icons.load(path)?;
        debug!(icon = %id, path = %path.display(), "Registered theme aware icon");
        Ok(id)
    }

    /// The icon rendered with the current icon colors.
    pub fn icon_svg(&mut self, id: IconId) -> Option<&[u8]> {
        self.icon_color_list();
        let list = self.icon_colors.as_deref().unwrap_or_default();
        self.icons.svg(id, list)
    }

    pub fn release_icon(&mut self, id: IconId) -> bool {
        self.icons.release(id)
    }

    fn refresh_icons(&mut self) {
        if self.icons.is_empty() {
            return;
        }
        self.icon_color_list();
        let list = self.icon_colors.as_deref().unwrap_or_default();
        self.icons.refresh(list);
    }

    /// Output directories of every style selected so far.
    pub fn icon_search_paths(&self) -> &[PathBuf] {
        &self.icon_search_paths
    }

    /// Finds a generated file such as `primary/checkbox.svg`, newest style
    /// first.
    pub fn find_icon(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        self.icon_search_paths
            .iter()
            .rev()
            .map(|dir| dir.join(relative.as_ref()))
            .find(|path| path.is_file())
    }

    // ------------------------------------------------------------------
    // Events and errors
    // ------------------------------------------------------------------

    /// Registers a listener for [`StyleEvent`]s.
    pub fn subscribe<F>(&mut self, f: F) -> ListenerId
    where
        F: Fn(&StyleEvent) + 'static,
    {
        self.listeners.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// The error recorded by the last operation.
    pub fn last_error(&self) -> &LastError {
        &self.last_error
    }

    pub fn error_kind(&self) -> ErrorKind {
        self.last_error.kind
    }

    pub fn error_message(&self) -> &str {
        &self.last_error.message
    }

    fn clear_error(&mut self) {
        self.last_error = LastError::default();
    }

    fn fail(&mut self, err: StyleError) -> StyleError {
        warn!(kind = %err.kind(), error = %err, "Style operation failed");
        self.last_error = LastError::from(&err);
        err
    }

    fn record<T>(&mut self, result: Result<T, StyleError>) -> Result<T, StyleError> {
        result.map_err(|err| self.fail(err))
    }
}

impl fmt::Debug for StyleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleManager")
            .field("styles_dir", &self.styles_dir)
            .field("output_dir", &self.output_dir)
            .field("current_style", &self.current_style)
            .field("current_theme", &self.current_theme)
            .field("state", &self.state)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

/// `dir/demo.qss.in` → `demo.css`.
fn stylesheet_file_name(template: &str) -> String {
    let file_name = Path::new(template)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(template);
    let base = file_name.split('.').next().unwrap_or(file_name);
    format!("{}.css", base)
}
