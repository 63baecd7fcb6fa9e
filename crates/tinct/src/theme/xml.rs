//! Theme XML parsing.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::vars::Variables;

const ROOT_TAG: &[u8] = b"resources";
const COLOR_TAG: &[u8] = b"color";

/// A parsed theme file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeDescriptor {
    /// Color name to literal color value.
    pub colors: Variables,
    /// Set by `dark="1"` on the root element.
    pub is_dark: bool,
}

/// Parses theme XML.
///
/// The document must have a `<resources>` root whose children are all
/// `<color name="...">value</color>` elements with a non empty name and
/// value. Values are trimmed. On error, returns a message describing the
/// first violation.
pub fn parse_theme(source: &str) -> Result<ThemeDescriptor, String> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut theme = ThemeDescriptor::default();

    // Root element
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                theme.is_dark = read_root(&e)?;
                break;
            }
            Ok(Event::Empty(e)) => {
                theme.is_dark = read_root(&e)?;
                return Ok(theme);
            }
            Ok(Event::Eof) => return Err("empty document, expected <resources>".to_string()),
            Ok(_) => {}
            Err(e) => return Err(syntax_error(&reader, e)),
        }
    }

    // Children of <resources>
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = read_color_name(&e)?;
                let value = read_color_value(&mut reader, &name)?;
                theme.colors.insert(name, value);
            }
            Ok(Event::Empty(e)) => {
                let name = read_color_name(&e)?;
                return Err(format!("color '{}' has no value", name));
            }
            Ok(Event::End(_)) => return Ok(theme),
            Ok(Event::Eof) => return Err("unexpected end of file, expected </resources>".to_string()),
            Ok(_) => {}
            Err(e) => return Err(syntax_error(&reader, e)),
        }
    }
}

fn read_root(e: &BytesStart<'_>) -> Result<bool, String> {
    if e.name().as_ref() != ROOT_TAG {
        return Err(format!(
            "expected tag <resources> instead of <{}>",
            tag_name(e)
        ));
    }
    let dark = attribute(e, "dark")?.unwrap_or_default();
    Ok(dark.trim().parse::<i64>().map(|v| v == 1).unwrap_or(false))
}

fn read_color_name(e: &BytesStart<'_>) -> Result<String, String> {
    if e.name().as_ref() != COLOR_TAG {
        return Err(format!("expected tag <color> instead of <{}>", tag_name(e)));
    }
    match attribute(e, "name")? {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err("name attribute missing in <color> tag".to_string()),
    }
}

fn read_color_value(reader: &mut Reader<&[u8]>, name: &str) -> Result<String, String> {
    let mut value = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                value.push_str(&text);
            }
            Ok(Event::CData(c)) => value.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Ok(Event::End(_)) => break,
            Ok(Event::Start(e) | Event::Empty(e)) => {
                return Err(format!(
                    "unexpected element <{}> inside color '{}'",
                    tag_name(&e),
                    name
                ))
            }
            Ok(Event::Eof) => return Err(format!("unexpected end of file inside color '{}'", name)),
            Ok(_) => {}
            Err(e) => return Err(syntax_error(reader, e)),
        }
    }

    let value = value.trim();
    if value.is_empty() {
        return Err(format!("color '{}' has no value", name));
    }
    Ok(value.to_string())
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, String> {
    let attr = e.try_get_attribute(key).map_err(|err| err.to_string())?;
    attr.map(|a| {
        a.unescape_value()
            .map(Cow::into_owned)
            .map_err(|err| err.to_string())
    })
    .transpose()
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn syntax_error(reader: &Reader<&[u8]>, e: quick_xml::Error) -> String {
    format!("XML error at position {}: {}", reader.error_position(), e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dark_theme() {
        let theme = parse_theme(
            r##"<?xml version="1.0" encoding="UTF-8"?>
            <!-- teal accent -->
            <resources dark="1">
                <color name="primaryColor">#1de9b6</color>
                <color name="backgroundColor"> #232629 </color>
            </resources>"##,
        )
        .unwrap();

        assert!(theme.is_dark);
        assert_eq!(theme.colors.len(), 2);
        assert_eq!(theme.colors["primaryColor"], "#1de9b6");
        assert_eq!(theme.colors["backgroundColor"], "#232629");
    }

    #[test]
    fn test_light_when_dark_missing_or_zero() {
        assert!(!parse_theme("<resources/>").unwrap().is_dark);
        assert!(!parse_theme(r#"<resources dark="0"></resources>"#).unwrap().is_dark);
        assert!(!parse_theme(r#"<resources dark="yes"></resources>"#).unwrap().is_dark);
    }

    #[test]
    fn test_wrong_root_tag() {
        let err = parse_theme("<theme></theme>").unwrap_err();
        assert!(err.contains("<resources>"));
        assert!(err.contains("<theme>"));
    }

    #[test]
    fn test_wrong_child_tag() {
        let err = parse_theme(r#"<resources><font name="a">x</font></resources>"#).unwrap_err();
        assert!(err.contains("<color>"));
    }

    #[test]
    fn test_missing_name() {
        let err = parse_theme("<resources><color>#fff</color></resources>").unwrap_err();
        assert!(err.contains("name attribute"));
        let err = parse_theme(r#"<resources><color name="">#fff</color></resources>"#).unwrap_err();
        assert!(err.contains("name attribute"));
    }

    #[test]
    fn test_missing_value() {
        let err = parse_theme(r#"<resources><color name="a"></color></resources>"#).unwrap_err();
        assert!(err.contains("no value"));
        let err = parse_theme(r#"<resources><color name="a"/></resources>"#).unwrap_err();
        assert!(err.contains("no value"));
    }

    #[test]
    fn test_syntax_error() {
        assert!(parse_theme(r#"<resources><color name="a">#fff</resources>"#).is_err());
        assert!(parse_theme("").is_err());
    }

    #[test]
    fn test_escaped_values() {
        let theme = parse_theme(r#"<resources><color name="a&amp;b">x&lt;y</color></resources>"#).unwrap();
        assert_eq!(theme.colors["a&b"], "x<y");
    }
}
