//! Builder for [`StyleManager`].

use std::fmt;
use std::path::PathBuf;

use crate::host::{Detached, FontRegistrar, PaletteTarget};
use crate::layout::StyleLayout;

use super::StyleManager;

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configures and creates a [`StyleManager`].
///
/// # Example
///
/// ```rust
/// use tinct::StyleManager;
///
/// let manager = StyleManager::builder()
///     .styles_dir("styles")
///     .output_dir("target/styles")
///     .build();
///
/// assert_eq!(manager.output_dir(), std::path::Path::new("target/styles"));
/// ```
pub struct StyleManagerBuilder {
    styles_dir: Option<PathBuf>,
    output_dir: PathBuf,
    layout: StyleLayout,
    fonts: Box<dyn FontRegistrar>,
    palette: Box<dyn PaletteTarget>,
}

impl Default for StyleManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleManagerBuilder {
    /// Creates a builder with the default layout and no GUI attached.
    pub fn new() -> Self {
        Self {
            styles_dir: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            layout: StyleLayout::default(),
            fonts: Box::new(Detached::new()),
            palette: Box::new(Detached::new()),
        }
    }

    /// Directory whose subdirectories are styles. Scanned on build.
    pub fn styles_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.styles_dir = Some(path.into());
        self
    }

    /// Root of the generated output tree.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn layout(mut self, layout: StyleLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Receiver for the fonts shipped with a style.
    pub fn font_registrar<R: FontRegistrar + 'static>(mut self, registrar: R) -> Self {
        self.fonts = Box::new(registrar);
        self
    }

    /// Application palette updated on regeneration.
    pub fn palette_target<P: PaletteTarget + 'static>(mut self, target: P) -> Self {
        self.palette = Box::new(target);
        self
    }

    pub fn build(self) -> StyleManager {
        let mut manager = StyleManager::from_parts(self.output_dir, self.layout, self.fonts, self.palette);
        if let Some(dir) = self.styles_dir {
            manager.set_styles_dir(dir);
        }
        manager
    }
}

impl fmt::Debug for StyleManagerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleManagerBuilder")
            .field("styles_dir", &self.styles_dir)
            .field("output_dir", &self.output_dir)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
