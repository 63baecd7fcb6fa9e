//! Stylesheet template processing.
//!
//! Templates are plain CSS/QSS text with `{{ }}` tokens. Nothing else in the
//! text is interpreted.
//!
//! ## Token Syntax
//!
//! ```text
//! {{primaryColor}}                 → #ffd740
//! {{primaryColor|opacity(0.5)}}    → #80ffd740
//! {{doesNotExist}}                 → (empty)
//! ```
//!
//! The opacity modifier inserts an alpha byte right after the `#`, giving
//! the `#AARRGGBB` form that Qt style sheets accept. The argument must be a
//! number between 0 and 1.
//!
//! Substitution is single pass: values are inserted verbatim and never
//! scanned for further tokens.

mod engine;
mod token;

pub use engine::{process_template, rgba_color};
pub use token::Token;

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::vars::{VariableStore, Variables};
    use proptest::prelude::*;

    fn name() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{0,12}"
    }

    proptest! {
        #[test]
        fn text_without_tokens_is_unchanged(text in "[^{}]*") {
            let vars = VariableStore::new();
            prop_assert_eq!(process_template(&text, &vars).unwrap(), text);
        }

        #[test]
        fn values_are_inserted_verbatim(key in name(), value in ".*") {
            let vars = VariableStore::with_style_variables(
                Variables::from([(key.clone(), value.clone())]),
            );
            let template = format!("a{{{{{}}}}}b", key);
            prop_assert_eq!(process_template(&template, &vars).unwrap(), format!("a{}b", value));
        }

        #[test]
        fn unknown_names_vanish(key in name(), prefix in "[^{}]*", suffix in "[^{}]*") {
            let vars = VariableStore::new();
            let template = format!("{}{{{{{}}}}}{}", prefix, key, suffix);
            prop_assert_eq!(process_template(&template, &vars).unwrap(), format!("{}{}", prefix, suffix));
        }

        #[test]
        fn opacity_alpha_matches_rounding(opacity in 0.0f64..=1.0, rgb in "[0-9a-f]{6}") {
            let vars = VariableStore::with_style_variables(
                Variables::from([("c".to_string(), format!("#{}", rgb))]),
            );
            let output = process_template(&format!("{{{{c|opacity({})}}}}", opacity), &vars).unwrap();
            let alpha = (255.0 * opacity).round() as u8;
            prop_assert_eq!(output, format!("#{:02x}{}", alpha, rgb));
        }
    }
}
