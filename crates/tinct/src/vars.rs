//! Layered variable store.
//!
//! Variables come from two layers:
//!
//! 1. **Style variables**: declared once in the style descriptor
//!    (`"variables"`), independent of the theme. Fonts, paddings, literal
//!    colors.
//! 2. **Theme colors**: declared in the active theme file. They overlay the
//!    style layer, so a theme color wins when both define the same name.
//!
//! The merged view is what templates, resource variants and palette rules
//! see. It is rebuilt wholesale whenever either layer is replaced; the only
//! in-place change is [`VariableStore::set_value`], used for application
//! specific overrides between a theme change and the next regeneration.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use tinct::VariableStore;
//!
//! let mut vars = VariableStore::new();
//! vars.set_style_variables(BTreeMap::from([("a".to_string(), "1".to_string())]));
//! vars.set_theme_colors(BTreeMap::from([
//!     ("a".to_string(), "2".to_string()),
//!     ("b".to_string(), "3".to_string()),
//! ]));
//!
//! assert_eq!(vars.value("a"), "2");
//! assert_eq!(vars.value("b"), "3");
//! assert_eq!(vars.value("missing"), "");
//! ```

use std::collections::BTreeMap;

use crate::palette::Color;

/// Name to value mapping used by both layers.
pub type Variables = BTreeMap<String, String>;

/// Style variables merged with theme colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    style: Variables,
    theme_colors: Variables,
    resolved: Variables,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding only the given style layer.
    pub fn with_style_variables(style: Variables) -> Self {
        let mut store = Self::new();
        store.set_style_variables(style);
        store
    }

    /// Replaces the style layer and rebuilds the merged view.
    pub fn set_style_variables(&mut self, style: Variables) {
        self.style = style;
        self.rebuild();
    }

    /// Replaces the theme layer and rebuilds the merged view.
    ///
    /// Any overrides made with [`set_value`](Self::set_value) are discarded.
    pub fn set_theme_colors(&mut self, colors: Variables) {
        self.theme_colors = colors;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let mut resolved = self.style.clone();
        resolved.extend(
            self.theme_colors
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.resolved = resolved;
    }

    /// Returns the resolved value, or an empty string if the name is unknown.
    pub fn value(&self, name: &str) -> &str {
        self.resolved.get(name).map(String::as_str).unwrap_or("")
    }

    /// Returns true if the name resolves to a value.
    pub fn contains(&self, name: &str) -> bool {
        self.resolved.contains_key(name)
    }

    /// Adds or overwrites a variable.
    ///
    /// The value goes into the merged view. If the name is also a theme
    /// color, the theme layer is updated too, so palette and resource
    /// generation see the same value as templates.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(color) = self.theme_colors.get_mut(&name) {
            *color = value.clone();
        }
        self.resolved.insert(name, value);
    }

    /// Returns the theme color with the given name.
    ///
    /// Only the theme layer is consulted. Returns `None` if the name is not a
    /// theme color or its value is not a valid color.
    pub fn color_of(&self, name: &str) -> Option<Color> {
        self.theme_colors
            .get(name)
            .filter(|value| !value.is_empty())
            .and_then(|value| Color::parse(value).ok())
    }

    /// Resolves a color reference.
    ///
    /// References starting with `#` are literal colors; anything else is
    /// looked up as a theme color.
    pub fn resolve_color(&self, reference: &str) -> Option<Color> {
        if reference.starts_with('#') {
            Color::parse(reference).ok()
        } else {
            self.color_of(reference)
        }
    }

    /// Resolves a replacement reference to text.
    ///
    /// References starting with `#` are literal colors and returned as-is;
    /// anything else resolves through the merged view.
    pub fn resolve_reference<'a>(&'a self, reference: &'a str) -> &'a str {
        if reference.starts_with('#') {
            reference
        } else {
            self.value(reference)
        }
    }

    /// The style layer.
    pub fn style_variables(&self) -> &Variables {
        &self.style
    }

    /// The theme layer.
    pub fn theme_colors(&self) -> &Variables {
        &self.theme_colors
    }

    /// The merged view.
    pub fn resolved(&self) -> &Variables {
        &self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_theme_wins_on_collision() {
        let mut store = VariableStore::with_style_variables(vars(&[("a", "1")]));
        store.set_theme_colors(vars(&[("a", "2"), ("b", "3")]));
        assert_eq!(store.resolved(), &vars(&[("a", "2"), ("b", "3")]));
    }

    #[test]
    fn test_missing_value_is_empty() {
        let store = VariableStore::new();
        assert_eq!(store.value("doesNotExist"), "");
        assert!(!store.contains("doesNotExist"));
    }

    #[test]
    fn test_theme_change_rebuilds_from_style_layer() {
        let mut store = VariableStore::with_style_variables(vars(&[("pad", "4px")]));
        store.set_theme_colors(vars(&[("primaryColor", "#111111")]));
        store.set_value("extra", "x");
        store.set_theme_colors(vars(&[("secondaryColor", "#222222")]));

        assert_eq!(store.value("pad"), "4px");
        assert_eq!(store.value("primaryColor"), "");
        assert_eq!(store.value("extra"), "");
        assert_eq!(store.value("secondaryColor"), "#222222");
    }

    #[test]
    fn test_override_updates_theme_color() {
        let mut store = VariableStore::new();
        store.set_theme_colors(vars(&[("primaryColor", "#111111")]));
        store.set_value("primaryColor", "#abcdef");

        assert_eq!(store.value("primaryColor"), "#abcdef");
        assert_eq!(store.color_of("primaryColor"), Some(Color::rgb(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn test_override_of_non_theme_key_stays_out_of_theme_layer() {
        let mut store = VariableStore::new();
        store.set_value("appAccent", "#ff0000");

        assert_eq!(store.value("appAccent"), "#ff0000");
        assert!(store.theme_colors().is_empty());
        assert_eq!(store.color_of("appAccent"), None);
    }

    #[test]
    fn test_color_of_ignores_style_variables() {
        let mut store = VariableStore::with_style_variables(vars(&[("literal", "#ffffff")]));
        store.set_theme_colors(vars(&[("bad", "not-a-color")]));

        assert_eq!(store.color_of("literal"), None);
        assert_eq!(store.color_of("bad"), None);
        assert_eq!(store.color_of("absent"), None);
    }

    #[test]
    fn test_resolve_reference() {
        let mut store = VariableStore::new();
        store.set_theme_colors(vars(&[("primaryColor", "#112233")]));

        assert_eq!(store.resolve_reference("#ffffff"), "#ffffff");
        assert_eq!(store.resolve_reference("primaryColor"), "#112233");
        assert_eq!(store.resolve_reference("unknown"), "");
    }

    #[test]
    fn test_resolve_color() {
        let mut store = VariableStore::new();
        store.set_theme_colors(vars(&[("primaryColor", "#112233")]));

        assert_eq!(store.resolve_color("#000"), Some(Color::BLACK));
        assert_eq!(store.resolve_color("primaryColor"), Some(Color::rgb(0x11, 0x22, 0x33)));
        assert_eq!(store.resolve_color("#nope"), None);
    }
}
