//! Style descriptor loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::StyleError;
use crate::layout::{files_with_extension, StyleLayout};
use crate::palette::{ColorGroup, ColorRole, PaletteRule};
use crate::vars::Variables;

/// The parsed contents of a style's JSON descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    /// Display name of the style.
    pub name: String,
    /// Theme selected by `set_default_theme`.
    pub default_theme: String,
    /// Style icon, relative to the style directory.
    pub icon: Option<String>,
    /// Stylesheet template, relative to the style directory.
    pub css_template: Option<String>,
    /// Style layer of the variable store.
    pub variables: Variables,
    pub palette_rules: Vec<PaletteRule>,
    /// Theme color that seeds the palette before the rules apply.
    pub palette_base_color: Option<String>,
    /// `resources` section, one raw entry per variant. `None` if the key is
    /// absent or not an object.
    pub resource_variants: Option<BTreeMap<String, Value>>,
    /// Replacements for theme aware icons.
    pub icon_colors: BTreeMap<String, String>,
    /// The descriptor file this was read from.
    pub path: PathBuf,
    /// The whole document.
    pub raw: Value,
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    default_theme: Value,
    #[serde(default)]
    icon: Value,
    #[serde(default)]
    css_template: Value,
    #[serde(default)]
    variables: Value,
    #[serde(default)]
    palette: Value,
    #[serde(default)]
    icon_colors: Value,
    #[serde(default)]
    resources: Value,
}

/// Loads the single descriptor file of `style_dir`.
///
/// # Errors
///
/// Returns a style descriptor error if the directory holds no descriptor,
/// more than one, an unreadable or malformed one, or one missing `name` or
/// `default_theme`.
pub fn load_descriptor(style_dir: &Path, layout: &StyleLayout) -> Result<StyleDescriptor, StyleError> {
    let mut candidates = files_with_extension(style_dir, &layout.descriptor_extension);
    let path = match candidates.len() {
        0 => {
            return Err(StyleError::StyleDescriptor {
                path: Some(style_dir.to_path_buf()),
                message: "style directory does not contain a style descriptor".to_string(),
            })
        }
        1 => candidates.remove(0),
        n => {
            return Err(StyleError::StyleDescriptor {
                path: Some(style_dir.to_path_buf()),
                message: format!("style directory contains {} descriptor files", n),
            })
        }
    };

    debug!(path = %path.display(), "Loading style descriptor");
    let content = fs::read_to_string(&path).map_err(|e| StyleError::StyleDescriptor {
        path: Some(path.clone()),
        message: format!("cannot read descriptor: {}", e),
    })?;

    parse_descriptor(&content, path)
}

/// Parses descriptor JSON. `path` is recorded in errors and on the result.
pub fn parse_descriptor(content: &str, path: PathBuf) -> Result<StyleDescriptor, StyleError> {
    let fail = |message: String| StyleError::StyleDescriptor {
        path: Some(path.clone()),
        message,
    };

    let raw: Value = serde_json::from_str(content).map_err(|e| fail(format!("invalid JSON: {}", e)))?;
    if !raw.is_object() {
        return Err(fail("descriptor root must be an object".to_string()));
    }
    let doc: RawDescriptor =
        serde_json::from_value(raw.clone()).map_err(|e| fail(format!("invalid JSON: {}", e)))?;

    let name = stringify(&doc.name);
    if name.is_empty() {
        return Err(fail("no key \"name\" found".to_string()));
    }
    let default_theme = stringify(&doc.default_theme);
    if default_theme.is_empty() {
        return Err(fail("no key \"default_theme\" found".to_string()));
    }

    let (palette_rules, palette_base_color) = parse_palette(&doc.palette);

    Ok(StyleDescriptor {
        name,
        default_theme,
        icon: non_empty(stringify(&doc.icon)),
        css_template: non_empty(stringify(&doc.css_template)),
        variables: string_map(&doc.variables),
        palette_rules,
        palette_base_color,
        resource_variants: doc.resources.as_object().map(|variants| {
            variants
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        }),
        icon_colors: string_map(&doc.icon_colors),
        path,
        raw,
    })
}

fn parse_palette(palette: &Value) -> (Vec<PaletteRule>, Option<String>) {
    let Some(palette) = palette.as_object() else {
        return (Vec::new(), None);
    };

    let base_color = palette.get("base_color").map(stringify).and_then(non_empty);
    let mut rules = Vec::new();
    for group in ColorGroup::ALL {
        let Some(entries) = palette.get(group.name()).and_then(Value::as_object) else {
            continue;
        };
        for (role_name, variable) in entries {
            match ColorRole::from_name(role_name) {
                Some(role) => rules.push(PaletteRule::new(group, role, stringify(variable))),
                None => debug!(group = %group, role = %role_name, "Skipping unknown palette role"),
            }
        }
    }
    (rules, base_color)
}

/// Converts an object of scalars into a string map.
///
/// Returns an empty map for anything that is not an object.
pub(crate) fn string_map(value: &Value) -> BTreeMap<String, String> {
    value
        .as_object()
        .map(|object| {
            object
                .iter()
                .map(|(k, v)| (k.clone(), stringify(v)))
                .collect()
        })
        .unwrap_or_default()
}

/// Strings pass through, numbers and booleans are printed, everything else
/// is empty.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    const DEMO: &str = r##"{
        "name": "Demo",
        "default_theme": "dark_teal",
        "icon": "demo.svg",
        "css_template": "demo.css",
        "variables": { "pad": "4px", "radius": 3, "bold": true, "list": [1] },
        "palette": {
            "base_color": "backgroundColor",
            "active": { "Highlight": "primaryColor", "Bogus": "x" },
            "disabled": { "Text": "#9e9e9e" }
        },
        "icon_colors": { "#0000ff": "primaryColor" },
        "resources": {
            "primary": { "#ff0000": "primaryColor" },
            "disabled": { "#ff0000": "#9e9e9e" }
        }
    }"##;

    fn parse(content: &str) -> Result<StyleDescriptor, StyleError> {
        parse_descriptor(content, PathBuf::from("demo.json"))
    }

    #[test]
    fn test_parse_full_descriptor() {
        let desc = parse(DEMO).unwrap();
        assert_eq!(desc.name, "Demo");
        assert_eq!(desc.default_theme, "dark_teal");
        assert_eq!(desc.icon.as_deref(), Some("demo.svg"));
        assert_eq!(desc.css_template.as_deref(), Some("demo.css"));
        assert_eq!(desc.palette_base_color.as_deref(), Some("backgroundColor"));
        assert_eq!(desc.icon_colors.get("#0000ff").map(String::as_str), Some("primaryColor"));
        assert_eq!(desc.resource_variants.as_ref().map(|v| v.len()), Some(2));
        assert_eq!(desc.raw["name"], "Demo");
    }

    #[test]
    fn test_variables_are_stringified() {
        let desc = parse(DEMO).unwrap();
        assert_eq!(desc.variables.get("pad").map(String::as_str), Some("4px"));
        assert_eq!(desc.variables.get("radius").map(String::as_str), Some("3"));
        assert_eq!(desc.variables.get("bold").map(String::as_str), Some("true"));
        assert_eq!(desc.variables.get("list").map(String::as_str), Some(""));
    }

    #[test]
    fn test_palette_rules_skip_unknown_roles() {
        let desc = parse(DEMO).unwrap();
        assert_eq!(
            desc.palette_rules,
            vec![
                PaletteRule::new(ColorGroup::Active, ColorRole::Highlight, "primaryColor"),
                PaletteRule::new(ColorGroup::Disabled, ColorRole::Text, "#9e9e9e"),
            ]
        );
    }

    #[test]
    fn test_minimal_descriptor() {
        let desc = parse(r#"{"name": "Bare", "default_theme": "light"}"#).unwrap();
        assert!(desc.css_template.is_none());
        assert!(desc.resource_variants.is_none());
        assert!(desc.palette_rules.is_empty());
        assert!(desc.variables.is_empty());
    }

    #[test]
    fn test_missing_name() {
        let err = parse(r#"{"default_theme": "light"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StyleDescriptor);
        assert!(err.to_string().contains("\"name\""));
    }

    #[test]
    fn test_empty_default_theme() {
        let err = parse(r#"{"name": "x", "default_theme": ""}"#).unwrap_err();
        assert!(err.to_string().contains("default_theme"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse("{ name: ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StyleDescriptor);
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_non_object_root() {
        assert!(parse("[1, 2]").is_err());
    }

    #[test]
    fn test_load_requires_exactly_one_file() {
        let temp_dir = TempDir::new().unwrap();
        let layout = StyleLayout::default();

        let err = load_descriptor(temp_dir.path(), &layout).unwrap_err();
        assert!(err.to_string().contains("does not contain"));

        fs::write(temp_dir.path().join("a.json"), DEMO).unwrap();
        assert_eq!(load_descriptor(temp_dir.path(), &layout).unwrap().name, "Demo");

        fs::write(temp_dir.path().join("b.json"), DEMO).unwrap();
        let err = load_descriptor(temp_dir.path(), &layout).unwrap_err();
        assert!(err.to_string().contains("2 descriptor files"));
    }
}
