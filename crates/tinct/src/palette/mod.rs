//! Native color palette generation.
//!
//! A [`Palette`] holds one [`Color`] per ([`ColorGroup`], [`ColorRole`]) slot,
//! the shape GUI toolkits use for their widget palettes. The style descriptor
//! maps slots to theme colors:
//!
//! ```json
//! "palette": {
//!     "base_color": "backgroundColor",
//!     "active":   { "Highlight": "primaryColor", "Text": "secondaryTextColor" },
//!     "disabled": { "Text": "#9e9e9e" }
//! }
//! ```
//!
//! [`build_palette`] turns those rules into a finished palette. Applying it
//! is left to the host through [`PaletteTarget`](crate::PaletteTarget).

mod builder;
mod color;
mod roles;

pub use builder::{build_palette, PaletteRule};
pub use color::Color;
pub use roles::{ColorGroup, ColorRole};

const DARK_GRAY: Color = Color::rgb(0x80, 0x80, 0x80);

/// A complete set of palette colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [[Color; ColorRole::COUNT]; 3],
}

impl Default for Palette {
    /// A light palette seeded from `#efefef`.
    fn default() -> Self {
        Self::from_button_color(Color::rgb(0xef, 0xef, 0xef))
    }
}

impl Palette {
    /// Creates a palette where every role derives from a single button color.
    ///
    /// Light, dark and mid shades are computed from the button color; text
    /// and base colors are black on white for light buttons and white on
    /// black for dark ones. Disabled text roles are dark gray.
    pub fn from_button_color(button: Color) -> Self {
        let (foreground, base) = if button.value() > 128 {
            (Color::BLACK, Color::WHITE)
        } else {
            (Color::WHITE, Color::BLACK)
        };

        let light = button.lighter(150);
        let midlight = Color::rgba(
            ((button.r as u16 + light.r as u16) / 2) as u8,
            ((button.g as u16 + light.g as u16) / 2) as u8,
            ((button.b as u16 + light.b as u16) / 2) as u8,
            button.a,
        );
        let placeholder = Color { a: 128, ..foreground };

        let mut group = [Color::BLACK; ColorRole::COUNT];
        for role in ColorRole::ALL {
            group[role.index()] = match role {
                ColorRole::WindowText | ColorRole::Text | ColorRole::ButtonText => foreground,
                ColorRole::Button | ColorRole::Window => button,
                ColorRole::Light => light,
                ColorRole::Midlight => midlight,
                ColorRole::Dark => button.darker(200),
                ColorRole::Mid => button.darker(150),
                ColorRole::BrightText => Color::WHITE,
                ColorRole::Base => base,
                ColorRole::AlternateBase => base.darker(110),
                ColorRole::Shadow => Color::BLACK,
                ColorRole::Highlight => Color::rgb(0, 0, 0x80),
                ColorRole::HighlightedText => Color::WHITE,
                ColorRole::Link => Color::rgb(0, 0, 0xff),
                ColorRole::LinkVisited => Color::rgb(0xff, 0, 0xff),
                ColorRole::ToolTipBase => Color::rgb(0xff, 0xff, 0xdc),
                ColorRole::ToolTipText => Color::BLACK,
                ColorRole::PlaceholderText => placeholder,
            };
        }

        let mut palette = Self {
            colors: [group; 3],
        };
        for role in [ColorRole::WindowText, ColorRole::Text, ColorRole::ButtonText] {
            palette.set(ColorGroup::Disabled, role, DARK_GRAY);
        }
        palette
    }

    /// Returns the color of a slot.
    pub fn color(&self, group: ColorGroup, role: ColorRole) -> Color {
        self.colors[group.index()][role.index()]
    }

    /// Sets the color of a slot.
    pub fn set(&mut self, group: ColorGroup, role: ColorRole, color: Color) {
        self.colors[group.index()][role.index()] = color;
    }

    /// Iterates over every slot.
    pub fn iter(&self) -> impl Iterator<Item = (ColorGroup, ColorRole, Color)> + '_ {
        ColorGroup::ALL.into_iter().flat_map(move |group| {
            ColorRole::ALL
                .into_iter()
                .map(move |role| (group, role, self.color(group, role)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_button_gets_dark_text() {
        let palette = Palette::from_button_color(Color::rgb(0xee, 0xee, 0xee));
        assert_eq!(palette.color(ColorGroup::Active, ColorRole::Text), Color::BLACK);
        assert_eq!(palette.color(ColorGroup::Active, ColorRole::Base), Color::WHITE);
    }

    #[test]
    fn test_dark_button_gets_light_text() {
        let palette = Palette::from_button_color(Color::rgb(0x20, 0x20, 0x20));
        assert_eq!(palette.color(ColorGroup::Active, ColorRole::WindowText), Color::WHITE);
        assert_eq!(palette.color(ColorGroup::Inactive, ColorRole::Base), Color::BLACK);
        assert_eq!(
            palette.color(ColorGroup::Active, ColorRole::Window),
            Color::rgb(0x20, 0x20, 0x20)
        );
    }

    #[test]
    fn test_disabled_text_is_gray() {
        let palette = Palette::from_button_color(Color::rgb(0x20, 0x20, 0x20));
        assert_eq!(palette.color(ColorGroup::Disabled, ColorRole::Text), DARK_GRAY);
        assert_eq!(palette.color(ColorGroup::Disabled, ColorRole::ButtonText), DARK_GRAY);
        assert_eq!(palette.color(ColorGroup::Disabled, ColorRole::Base), Color::BLACK);
    }

    #[test]
    fn test_set_only_touches_one_slot() {
        let mut palette = Palette::default();
        let before = palette.clone();
        palette.set(ColorGroup::Inactive, ColorRole::Highlight, Color::rgb(1, 2, 3));

        let changed: Vec<_> = palette
            .iter()
            .zip(before.iter())
            .filter(|(a, b)| a != b)
            .map(|(a, _)| (a.0, a.1))
            .collect();
        assert_eq!(changed, vec![(ColorGroup::Inactive, ColorRole::Highlight)]);
    }

    #[test]
    fn test_iter_covers_every_slot() {
        assert_eq!(Palette::default().iter().count(), 3 * ColorRole::COUNT);
    }
}
