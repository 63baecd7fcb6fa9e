//! Font registration.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::host::FontRegistrar;
use crate::layout::has_extension;

/// Hands every font below `fonts_dir` to the registrar.
///
/// The directory is walked recursively in file name order. Nothing happens
/// if the registrar is not ready. Unreadable files and rejected fonts are
/// logged and skipped. Returns the number of fonts the registrar accepted.
pub fn register_fonts(fonts_dir: &Path, extension: &str, registrar: &mut dyn FontRegistrar) -> usize {
    if !registrar.is_ready() {
        debug!(dir = %fonts_dir.display(), "Font registrar not ready, skipping fonts");
        return 0;
    }
    if !fonts_dir.is_dir() {
        return 0;
    }

    let mut registered = 0;
    let fonts = WalkDir::new(fonts_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), extension));

    for entry in fonts {
        let path = entry.path();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read font");
                continue;
            }
        };
        if registrar.register_font(path, &data) {
            registered += 1;
        } else {
            warn!(path = %path.display(), "Font rejected");
        }
    }

    debug!(dir = %fonts_dir.display(), count = registered, "Registered fonts");
    registered
}
