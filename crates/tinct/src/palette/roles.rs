//! Palette color groups and roles.
//!
//! Names follow the descriptor's `palette` section: groups are the lowercase
//! keys `active`, `disabled` and `inactive`; roles are CamelCase keys such as
//! `WindowText` or `Highlight`.

use std::fmt;

/// Widget state a palette entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorGroup {
    Active,
    Disabled,
    Inactive,
}

impl ColorGroup {
    /// All groups, in palette storage order.
    pub const ALL: [ColorGroup; 3] = [ColorGroup::Active, ColorGroup::Disabled, ColorGroup::Inactive];

    /// The descriptor key for this group.
    pub fn name(self) -> &'static str {
        match self {
            ColorGroup::Active => "active",
            ColorGroup::Disabled => "disabled",
            ColorGroup::Inactive => "inactive",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The purpose of a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorRole {
    WindowText,
    Button,
    Light,
    Midlight,
    Dark,
    Mid,
    Text,
    BrightText,
    ButtonText,
    Base,
    Window,
    Shadow,
    Highlight,
    HighlightedText,
    Link,
    LinkVisited,
    AlternateBase,
    ToolTipBase,
    ToolTipText,
    PlaceholderText,
}

impl ColorRole {
    /// Number of roles stored per group.
    pub const COUNT: usize = 20;

    /// All roles, in palette storage order.
    pub const ALL: [ColorRole; ColorRole::COUNT] = [
        ColorRole::WindowText,
        ColorRole::Button,
        ColorRole::Light,
        ColorRole::Midlight,
        ColorRole::Dark,
        ColorRole::Mid,
        ColorRole::Text,
        ColorRole::BrightText,
        ColorRole::ButtonText,
        ColorRole::Base,
        ColorRole::Window,
        ColorRole::Shadow,
        ColorRole::Highlight,
        ColorRole::HighlightedText,
        ColorRole::Link,
        ColorRole::LinkVisited,
        ColorRole::AlternateBase,
        ColorRole::ToolTipBase,
        ColorRole::ToolTipText,
        ColorRole::PlaceholderText,
    ];

    /// Looks up a role by its descriptor name.
    ///
    /// Returns `None` for unknown names and for `NoRole`, which names no slot.
    pub fn from_name(name: &str) -> Option<Self> {
        ColorRole::ALL.into_iter().find(|role| role.name() == name)
    }

    /// The descriptor key for this role.
    pub fn name(self) -> &'static str {
        match self {
            ColorRole::WindowText => "WindowText",
            ColorRole::Button => "Button",
            ColorRole::Light => "Light",
            ColorRole::Midlight => "Midlight",
            ColorRole::Dark => "Dark",
            ColorRole::Mid => "Mid",
            ColorRole::Text => "Text",
            ColorRole::BrightText => "BrightText",
            ColorRole::ButtonText => "ButtonText",
            ColorRole::Base => "Base",
            ColorRole::Window => "Window",
            ColorRole::Shadow => "Shadow",
            ColorRole::Highlight => "Highlight",
            ColorRole::HighlightedText => "HighlightedText",
            ColorRole::Link => "Link",
            ColorRole::LinkVisited => "LinkVisited",
            ColorRole::AlternateBase => "AlternateBase",
            ColorRole::ToolTipBase => "ToolTipBase",
            ColorRole::ToolTipText => "ToolTipText",
            ColorRole::PlaceholderText => "PlaceholderText",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip() {
        for role in ColorRole::ALL {
            assert_eq!(ColorRole::from_name(role.name()), Some(role));
        }
    }

    #[test]
    fn test_role_storage_order_matches_index() {
        for (i, role) in ColorRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_unknown_and_no_role() {
        assert_eq!(ColorRole::from_name("NoRole"), None);
        assert_eq!(ColorRole::from_name("windowtext"), None);
        assert_eq!(ColorRole::from_name(""), None);
    }

    #[test]
    fn test_group_names() {
        let names: Vec<&str> = ColorGroup::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["active", "disabled", "inactive"]);
    }
}
