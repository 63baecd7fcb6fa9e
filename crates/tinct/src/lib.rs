//! # Tinct - Themeable Stylesheets for Desktop Applications
//!
//! `tinct` turns a style directory (a JSON descriptor, XML theme files, a
//! stylesheet template and SVG resources) into everything a desktop GUI
//! needs to switch themes at runtime: stylesheet text, color tinted icon
//! variants and a native color palette.
//!
//! The crate never talks to a toolkit. Fonts and palettes are handed to the
//! embedder through [`FontRegistrar`] and [`PaletteTarget`], and changes are
//! announced to [`StyleEvent`] listeners.
//!
//! ## Core Concepts
//!
//! - [`StyleManager`]: Selects styles and themes and drives generation
//! - [`VariableStore`]: Style variables overlaid with theme colors
//! - [`process_template`]: `{{name}}` and `{{name|opacity(0.5)}}` substitution
//! - [`StyleDescriptor`]: Parsed `<style>/<name>.json`
//! - [`ThemeDescriptor`]: Parsed `<style>/themes/<theme>.xml`
//! - [`Palette`]: Colors per group and role, built by [`build_palette`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::fs;
//! use tinct::StyleManager;
//!
//! let root = tempfile::tempdir().unwrap();
//! let style = root.path().join("styles/demo");
//! fs::create_dir_all(style.join("themes")).unwrap();
//! fs::create_dir_all(style.join("resources")).unwrap();
//! fs::write(style.join("demo.json"), r##"{
//!     "name": "Demo",
//!     "default_theme": "dark_teal",
//!     "css_template": "demo.css",
//!     "variables": { "pad": "4px" },
//!     "resources": { "primary": { "#ff0000": "primaryColor" } }
//! }"##).unwrap();
//! fs::write(style.join("demo.css"),
//!     "QPushButton { color: {{primaryColor}}; padding: {{pad}}; }").unwrap();
//! fs::write(style.join("themes/dark_teal.xml"),
//!     r##"<resources dark="1"><color name="primaryColor">#1de9b6</color></resources>"##).unwrap();
//!
//! let mut manager = StyleManager::builder()
//!     .styles_dir(root.path().join("styles"))
//!     .output_dir(root.path().join("out"))
//!     .build();
//!
//! manager.set_current_style("demo").unwrap();
//! manager.set_default_theme().unwrap();
//! manager.regenerate().unwrap();
//!
//! assert_eq!(manager.stylesheet(), "QPushButton { color: #1de9b6; padding: 4px; }");
//! assert!(root.path().join("out/demo/demo.css").exists());
//! ```
//!
//! ## Variables
//!
//! Templates see one merged view: the descriptor's `variables` overlaid with
//! the active theme's colors, theme winning on collision. Unknown names
//! render as empty strings. Overrides set through
//! [`StyleManager::set_theme_variable_value`] last until the next theme
//! selection.
//!
//! ## Generated Output
//!
//! ```text
//! <output>/<style>/<template base name>.css
//! <output>/<style>/<variant>/<resource>.svg
//! ```

mod error;
mod fonts;
mod host;
mod icons;
mod layout;
pub mod manager;
pub mod palette;
mod resources;
pub mod style;
mod svg;
pub mod template;
pub mod theme;
mod vars;

// Error types
pub use error::{ErrorKind, LastError, StyleError};

// Orchestrator
pub use manager::{
    ListenerId, PipelineState, StyleEvent, StyleManager, StyleManagerBuilder, DEFAULT_OUTPUT_DIR,
};

// Pipeline stages
pub use fonts::register_fonts;
pub use resources::{generate_resources, ResourceReport};
pub use style::{load_descriptor, parse_descriptor, StyleDescriptor};
pub use svg::{replace_svg_colors, resolve_color_replace_list, ColorReplaceList};
pub use template::{process_template, rgba_color};
pub use theme::{list_themes, load_theme, parse_theme, ThemeDescriptor};
pub use vars::{VariableStore, Variables};

// Palette
pub use palette::{build_palette, Color, ColorGroup, ColorRole, Palette, PaletteRule};

// Collaborators
pub use host::{Detached, FontRegistrar, PaletteTarget};
pub use icons::{IconId, IconRegistry};
pub use layout::{Location, StyleLayout};
