//! Theme aware icons.
//!
//! An icon is registered once with its SVG template. Whenever it is asked
//! for, it is rendered through the current icon color replace list; the
//! result is cached until the list changes or [`IconRegistry::refresh`]
//! forces a re-render after a theme change.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::svg::replace_svg_colors;

/// Handle of a registered icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconId(u64);

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "icon#{}", self.0)
    }
}

#[derive(Debug)]
struct IconEntry {
    template: Vec<u8>,
    rendered: Vec<u8>,
    rendered_with: Option<Vec<(String, String)>>,
}

impl IconEntry {
    fn render(&mut self, list: &[(String, String)]) {
        self.rendered = replace_svg_colors(&self.template, list);
        self.rendered_with = Some(list.to_vec());
    }
}

/// Live icons and their rendered content.
#[derive(Debug, Default)]
pub struct IconRegistry {
    next_id: u64,
    icons: BTreeMap<IconId, IconEntry>,
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an SVG template and returns its handle.
    pub fn register(&mut self, template: Vec<u8>) -> IconId {
        let id = IconId(self.next_id);
        self.next_id += 1;
        self.icons.insert(
            id,
            IconEntry {
                template,
                rendered: Vec::new(),
                rendered_with: None,
            },
        );
        id
    }

    /// Reads an SVG file and registers it.
    pub fn load(&mut self, path: &Path) -> io::Result<IconId> {
        Ok(self.register(fs::read(path)?))
    }

    /// Drops an icon. Returns false if the handle was unknown.
    pub fn release(&mut self, id: IconId) -> bool {
        self.icons.remove(&id).is_some()
    }

    /// Returns the icon rendered with `list`, re-rendering only if the list
    /// differs from the one used last time.
    pub fn svg(&mut self, id: IconId, list: &[(String, String)]) -> Option<&[u8]> {
        let entry = self.icons.get_mut(&id)?;
        if entry.rendered_with.as_deref() != Some(list) {
            entry.render(list);
        }
        Some(&entry.rendered)
    }

    /// Re-renders every live icon with `list`.
    pub fn refresh(&mut self, list: &[(String, String)]) {
        for entry in self.icons.values_mut() {
            entry.render(list);
        }
    }

    /// Number of live icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(from: &str, to: &str) -> Vec<(String, String)> {
        vec![(from.to_string(), to.to_string())]
    }

    #[test]
    fn test_render_and_cache() {
        let mut icons = IconRegistry::new();
        let id = icons.register(b"fill=#0000ff".to_vec());

        assert_eq!(icons.svg(id, &list("#0000ff", "#111111")).unwrap(), b"fill=#111111");
        assert_eq!(icons.svg(id, &list("#0000ff", "#222222")).unwrap(), b"fill=#222222");
    }

    #[test]
    fn test_release() {
        let mut icons = IconRegistry::new();
        let a = icons.register(b"a".to_vec());
        let b = icons.register(b"b".to_vec());
        assert_ne!(a, b);
        assert_eq!(icons.len(), 2);

        assert!(icons.release(a));
        assert!(!icons.release(a));
        assert!(icons.svg(a, &[]).is_none());
        assert_eq!(icons.svg(b, &[]).unwrap(), b"b");
    }

    #[test]
    fn test_refresh_renders_all() {
        let mut icons = IconRegistry::new();
        let a = icons.register(b"#aaa".to_vec());
        let b = icons.register(b"x #aaa".to_vec());
        let new_list = list("#aaa", "#bbb");
        icons.refresh(&new_list);

        assert_eq!(icons.svg(a, &new_list).unwrap(), b"#bbb");
        assert_eq!(icons.svg(b, &new_list).unwrap(), b"x #bbb");
    }

    #[test]
    fn test_load_missing_file() {
        let mut icons = IconRegistry::new();
        assert!(icons.load(Path::new("/definitely/not/here.svg")).is_err());
        assert!(icons.is_empty());
    }
}
