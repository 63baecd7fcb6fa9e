//! Generation of color variants of SVG resources.
//!
//! Each entry of the descriptor's `resources` section names a variant and
//! the color replacements it applies:
//!
//! ```json
//! "resources": {
//!     "primary":  { "#ff0000": "primaryColor" },
//!     "disabled": { "#ff0000": "#9e9e9e" }
//! }
//! ```
//!
//! Every SVG in the style's resources directory is rewritten once per
//! variant into `<output>/<variant>/`. Variants are independent: one that
//! fails does not stop the others.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StyleError;
use crate::style::string_map;
use crate::svg::{replace_svg_colors, resolve_color_replace_list};
use crate::vars::VariableStore;

/// Outcome of a resource generation run.
#[derive(Debug, Default)]
pub struct ResourceReport {
    /// Files written, in generation order.
    pub written: Vec<PathBuf>,
    /// Every failure, in the order encountered.
    pub errors: Vec<StyleError>,
}

impl ResourceReport {
    /// True if no variant failed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the report into a result carrying the first error.
    pub fn into_result(mut self) -> Result<Vec<PathBuf>, StyleError> {
        if self.errors.is_empty() {
            Ok(self.written)
        } else {
            Err(self.errors.remove(0))
        }
    }
}

/// Writes every variant of every template in `templates`.
///
/// `variants` is the descriptor's `resources` section; `None` or an empty
/// section is a style descriptor error. `templates` are the SVG files to
/// process and `output_dir` the style's output directory.
pub fn generate_resources(
    variants: Option<&BTreeMap<String, Value>>,
    templates: &[PathBuf],
    output_dir: &Path,
    vars: &VariableStore,
) -> ResourceReport {
    let mut report = ResourceReport::default();

    let variants = match variants {
        Some(variants) if !variants.is_empty() => variants,
        _ => {
            report
                .errors
                .push(StyleError::descriptor("key \"resources\" missing in style descriptor"));
            return report;
        }
    };

    // Read every template once; a template that cannot be read fails each variant.
    let sources: Vec<(&PathBuf, std::io::Result<Vec<u8>>)> =
        templates.iter().map(|path| (path, fs::read(path))).collect();

    for (variant, mapping) in variants {
        let colors = string_map(mapping);
        if colors.is_empty() {
            report.errors.push(StyleError::descriptor(format!(
                "resource variant \"{}\" has no color replacements",
                variant
            )));
            continue;
        }

        let target = output_dir.join(variant);
        if let Err(source) = fs::create_dir_all(&target) {
            report.errors.push(StyleError::ResourceGeneration {
                variant: variant.clone(),
                path: target,
                source,
            });
            continue;
        }

        let replace_list = resolve_color_replace_list(&colors, vars);
        debug!(variant = %variant, replacements = replace_list.len(), "Generating resource variant");

        for (template, content) in &sources {
            let content = match content {
                Ok(content) => content,
                Err(e) => {
                    report.errors.push(StyleError::ResourceGeneration {
                        variant: variant.clone(),
                        path: (*template).clone(),
                        source: std::io::Error::new(e.kind(), e.to_string()),
                    });
                    continue;
                }
            };
            let Some(file_name) = template.file_name() else {
                continue;
            };
            let out = target.join(file_name);
            match fs::write(&out, replace_svg_colors(content, &replace_list)) {
                Ok(()) => report.written.push(out),
                Err(source) => report.errors.push(StyleError::ResourceGeneration {
                    variant: variant.clone(),
                    path: out,
                    source,
                }),
            }
        }
    }

    for err in &report.errors {
        warn!(error = %err, "Resource generation failed");
    }
    report
}
