//! Color replacement in SVG content.
//!
//! SVG templates are drawn with placeholder colors. A replace list maps each
//! placeholder to the color a variant or theme wants, and
//! [`replace_svg_colors`] swaps them byte for byte. No XML parsing happens
//! here; the match is a literal, case sensitive substring search.

use std::collections::BTreeMap;

use memchr::memmem;

use crate::vars::VariableStore;

/// Ordered `(template color, replacement)` pairs.
pub type ColorReplaceList = Vec<(String, String)>;

/// Resolves a descriptor mapping into a replace list.
///
/// Right hand sides starting with `#` are literal colors; anything else is a
/// variable name resolved through `vars` (unknown names become empty).
pub fn resolve_color_replace_list(
    mapping: &BTreeMap<String, String>,
    vars: &VariableStore,
) -> ColorReplaceList {
    mapping
        .iter()
        .map(|(template, reference)| {
            (
                template.clone(),
                vars.resolve_reference(reference).to_string(),
            )
        })
        .collect()
}

/// Applies every replacement in order and returns the new content.
///
/// Each pair is applied to the output of the previous one, so a later pair
/// can match text an earlier pair produced. Empty template colors are
/// ignored.
pub fn replace_svg_colors(content: &[u8], list: &[(String, String)]) -> Vec<u8> {
    let mut current = content.to_vec();
    for (template, replacement) in list {
        if template.is_empty() {
            continue;
        }
        current = replace_all(&current, template.as_bytes(), replacement.as_bytes());
    }
    current
}

fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(haystack.len());
    let mut last = 0;
    for start in memmem::find_iter(haystack, needle) {
        // find_iter yields non-overlapping matches
        output.extend_from_slice(&haystack[last..start]);
        output.extend_from_slice(replacement);
        last = start + needle.len();
    }
    output.extend_from_slice(&haystack[last..]);
    output
}
