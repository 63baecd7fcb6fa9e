//! Palette construction from descriptor rules.

use tracing::debug;

use crate::vars::VariableStore;

use super::{ColorGroup, ColorRole, Palette};

/// One `(group, role, variable)` entry from the descriptor's `palette` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRule {
    pub group: ColorGroup,
    pub role: ColorRole,
    /// Theme color name, or a literal `#` color.
    pub variable: String,
}

impl PaletteRule {
    pub fn new(group: ColorGroup, role: ColorRole, variable: impl Into<String>) -> Self {
        Self {
            group,
            role,
            variable: variable.into(),
        }
    }
}

/// Builds a palette from theme colors.
///
/// Starts from `base`, or from a palette seeded with the color named by
/// `base_color` when that resolves to a valid color. Each rule whose
/// variable resolves to a valid color overwrites its slot; the rest leave the
/// slot as it was.
pub fn build_palette(
    base: &Palette,
    rules: &[PaletteRule],
    base_color: Option<&str>,
    vars: &VariableStore,
) -> Palette {
    let mut palette = match base_color.and_then(|name| vars.resolve_color(name)) {
        Some(color) => Palette::from_button_color(color),
        None => base.clone(),
    };

    for rule in rules {
        match vars.resolve_color(&rule.variable) {
            Some(color) => palette.set(rule.group, rule.role, color),
            None => debug!(
                group = %rule.group,
                role = %rule.role,
                variable = %rule.variable,
                "Palette variable does not resolve to a color, keeping slot"
            ),
        }
    }

    palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use std::collections::BTreeMap;

    fn store() -> VariableStore {
        let mut vars = VariableStore::with_style_variables(BTreeMap::from([(
            "pad".to_string(),
            "4px".to_string(),
        )]));
        vars.set_theme_colors(BTreeMap::from([
            ("primaryColor".to_string(), "#112233".to_string()),
            ("backgroundColor".to_string(), "#202020".to_string()),
        ]));
        vars
    }

    #[test]
    fn test_rules_set_slots() {
        let rules = vec![PaletteRule::new(
            ColorGroup::Active,
            ColorRole::Highlight,
            "primaryColor",
        )];
        let palette = build_palette(&Palette::default(), &rules, None, &store());
        assert_eq!(
            palette.color(ColorGroup::Active, ColorRole::Highlight),
            Color::rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn test_unresolvable_rule_leaves_slot() {
        let base = Palette::default();
        let rules = vec![
            PaletteRule::new(ColorGroup::Disabled, ColorRole::Text, "missing"),
            PaletteRule::new(ColorGroup::Disabled, ColorRole::Window, "pad"),
        ];
        let palette = build_palette(&base, &rules, None, &store());
        assert_eq!(palette, base);
    }

    #[test]
    fn test_literal_rule() {
        let rules = vec![PaletteRule::new(ColorGroup::Inactive, ColorRole::Link, "#00ff00")];
        let palette = build_palette(&Palette::default(), &rules, None, &store());
        assert_eq!(
            palette.color(ColorGroup::Inactive, ColorRole::Link),
            Color::rgb(0, 255, 0)
        );
    }

    #[test]
    fn test_base_color_seeds_palette() {
        let palette = build_palette(&Palette::default(), &[], Some("backgroundColor"), &store());
        assert_eq!(
            palette,
            Palette::from_button_color(Color::rgb(0x20, 0x20, 0x20))
        );
    }

    #[test]
    fn test_invalid_base_color_keeps_base() {
        let base = Palette::from_button_color(Color::rgb(10, 200, 10));
        let palette = build_palette(&base, &[], Some("missing"), &store());
        assert_eq!(palette, base);
    }
}
