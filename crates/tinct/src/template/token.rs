//! Parsing of the text between `{{` and `}}`.

use crate::error::StyleError;

const OPACITY: &str = "opacity";

/// A parsed template token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// `{{name}}`
    Variable(&'a str),
    /// `{{name|opacity(0.5)}}`
    Opacity { name: &'a str, opacity: f64 },
}

impl<'a> Token<'a> {
    /// Parses the inner text of a token. Surrounding whitespace is ignored.
    pub fn parse(inner: &'a str) -> Result<Self, StyleError> {
        let inner = inner.trim();
        let Some((name, modifier)) = inner.split_once('|') else {
            return Ok(Token::Variable(inner));
        };

        let name = name.trim();
        let modifier = modifier.trim();
        let argument = modifier
            .strip_prefix(OPACITY)
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| {
                StyleError::template(format!(
                    "Unknown modifier '{}' in token '{{{{{}}}}}'",
                    modifier, inner
                ))
            })?;

        let opacity = argument.trim().parse::<f64>().map_err(|_| {
            StyleError::template(format!(
                "Invalid opacity '{}' in token '{{{{{}}}}}': expected a number",
                argument.trim(),
                inner
            ))
        })?;

        if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
            return Err(StyleError::template(format!(
                "Opacity {} in token '{{{{{}}}}}' out of range (0-1)",
                opacity, inner
            )));
        }

        Ok(Token::Opacity { name, opacity })
    }
}
