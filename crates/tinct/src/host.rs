//! Interfaces to the GUI that consumes generated styles.
//!
//! The pipeline never touches a toolkit directly. Fonts and palettes reach
//! the GUI through these traits, which the embedder implements on top of its
//! font database and application object. [`Detached`] implements both for
//! headless use (tooling, tests).

use std::path::Path;

use crate::palette::Palette;

/// Receives font files found in a style's fonts directory.
pub trait FontRegistrar {
    /// Whether fonts can be registered right now. Toolkits usually need
    /// their application object and at least one widget first.
    fn is_ready(&self) -> bool {
        true
    }

    /// Registers one font. Returns false if the font was rejected.
    fn register_font(&mut self, path: &Path, data: &[u8]) -> bool;
}

/// The application palette.
pub trait PaletteTarget {
    /// The palette currently in effect.
    fn current_palette(&self) -> Palette;

    /// Replaces the application palette.
    fn apply_palette(&mut self, palette: &Palette);
}

/// A host with no GUI attached.
///
/// Never ready for fonts, so font files are not even read. Keeps the last
/// applied palette so it can be read back.
#[derive(Debug, Clone, Default)]
pub struct Detached {
    palette: Palette,
}

impl Detached {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FontRegistrar for Detached {
    fn is_ready(&self) -> bool {
        false
    }

    fn register_font(&mut self, _path: &Path, _data: &[u8]) -> bool {
        true
    }
}

impl PaletteTarget for Detached {
    fn current_palette(&self) -> Palette {
        self.palette.clone()
    }

    fn apply_palette(&mut self, palette: &Palette) {
        self.palette = palette.clone();
    }
}
