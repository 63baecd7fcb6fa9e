//! Token substitution.

use tracing::warn;

use crate::error::StyleError;
use crate::vars::VariableStore;

use super::token::Token;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replaces every `{{...}}` token in `template` with its resolved value.
///
/// Tokens are matched left to right, each ending at the first `}}` after its
/// `{{`. Replacement text is never scanned again, so a variable whose value
/// looks like a token is emitted literally. Unknown variables produce an
/// empty string. An unterminated `{{` is copied through unchanged.
///
/// # Errors
///
/// Returns a template error if a token carries a malformed or unknown
/// modifier. No partial output is returned in that case.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use tinct::{process_template, VariableStore};
///
/// let mut vars = VariableStore::new();
/// vars.set_theme_colors(BTreeMap::from([("primaryColor".to_string(), "#ffd740".to_string())]));
///
/// let css = process_template("QPushButton { color: {{primaryColor|opacity(0.5)}}; }", &vars).unwrap();
/// assert_eq!(css, "QPushButton { color: #80ffd740; }");
/// ```
pub fn process_template(template: &str, vars: &VariableStore) -> Result<String, StyleError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };

        output.push_str(&rest[..start]);
        match Token::parse(&after_open[..end])? {
            Token::Variable(name) => output.push_str(vars.value(name)),
            Token::Opacity { name, opacity } => {
                output.push_str(&rgba_color(vars.value(name), opacity))
            }
        }
        rest = &after_open[end + CLOSE.len()..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Inserts an alpha byte after the leading `#` of an `#RRGGBB` color.
///
/// The alpha is `round(255 * opacity)`, written as two lowercase hex digits.
/// Values that do not start with `#` are returned unchanged.
pub fn rgba_color(rgb: &str, opacity: f64) -> String {
    let Some(hex) = rgb.strip_prefix('#') else {
        warn!(value = rgb, "Opacity applied to a value that is not a hex color");
        return rgb.to_string();
    };
    let alpha = (255.0 * opacity.clamp(0.0, 1.0)).round() as u8;
    format!("#{:02x}{}", alpha, hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn store(pairs: &[(&str, &str)]) -> VariableStore {
        VariableStore::with_style_variables(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_simple_substitution() {
        let vars = store(&[("primaryColor", "#112233"), ("pad", "4px")]);
        let output = process_template(
            "button{color:{{primaryColor}};padding:{{pad}}}",
            &vars,
        )
        .unwrap();
        assert_eq!(output, "button{color:#112233;padding:4px}");
    }

    #[test]
    fn test_missing_variable_is_empty() {
        let output = process_template("x:{{doesNotExist}};", &store(&[])).unwrap();
        assert_eq!(output, "x:;");
    }

    #[test]
    fn test_no_recursive_expansion() {
        let vars = store(&[("a", "{{b}}"), ("b", "red")]);
        assert_eq!(process_template("{{a}}", &vars).unwrap(), "{{b}}");
    }

    #[test]
    fn test_opacity_encoding() {
        let vars = store(&[("primaryColor", "#ffd740")]);
        let output = process_template("{{primaryColor|opacity(0.5)}}", &vars).unwrap();
        assert_eq!(output, "#80ffd740");
    }

    #[test]
    fn test_opacity_extremes() {
        let vars = store(&[("c", "#000000")]);
        assert_eq!(process_template("{{c|opacity(0)}}", &vars).unwrap(), "#00000000");
        assert_eq!(process_template("{{c|opacity(1)}}", &vars).unwrap(), "#ff000000");
    }

    #[test]
    fn test_tokens_are_non_greedy() {
        let vars = store(&[("a", "1"), ("b", "2")]);
        let output = process_template("{{a}} and {{b}}", &vars).unwrap();
        assert_eq!(output, "1 and 2");
    }

    #[test]
    fn test_tokens_across_lines() {
        let vars = store(&[("a", "1"), ("b", "2")]);
        let output = process_template("x { a: {{a}};\n  b: {{b}}; }\n", &vars).unwrap();
        assert_eq!(output, "x { a: 1;\n  b: 2; }\n");
    }

    #[test]
    fn test_unterminated_token_is_literal() {
        let vars = store(&[("a", "1")]);
        let output = process_template("{{a}} then {{a", &vars).unwrap();
        assert_eq!(output, "1 then {{a");
    }

    #[test]
    fn test_trailing_brace_after_token() {
        let vars = store(&[("a", "1")]);
        assert_eq!(process_template("{{a}}}", &vars).unwrap(), "1}");
    }

    #[test]
    fn test_malformed_opacity_is_error() {
        let vars = store(&[("c", "#000000")]);
        let err = process_template("a {{c|opacity(x)}} b", &vars).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Template);
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "QWidget { background: #fff; }";
        assert_eq!(process_template(text, &store(&[])).unwrap(), text);
    }

    #[test]
    fn test_rgba_color_non_hex_unchanged() {
        assert_eq!(rgba_color("red", 0.5), "red");
        assert_eq!(rgba_color("", 0.5), "");
    }

    #[test]
    fn test_rgba_color_rounds() {
        assert_eq!(rgba_color("#ffffff", 0.1), "#1affffff");
    }
}
