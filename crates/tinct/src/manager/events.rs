//! Change notifications.

use std::fmt;
use std::rc::Rc;

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleEvent {
    /// A style was selected. Carries the style directory name.
    StyleChanged(String),
    /// A theme was selected. Carries the theme name.
    ThemeChanged(String),
    /// The stylesheet text may have changed and should be re-read.
    StylesheetChanged,
}

/// Type alias for listener functions.
pub type ListenerFn = Rc<dyn Fn(&StyleEvent)>;

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners, notified in subscription order.
#[derive(Clone, Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, ListenerFn)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, f: F) -> ListenerId
    where
        F: Fn(&StyleEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Rc::new(f)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn emit(&self, event: &StyleEvent) {
        for (_, listener) in &self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_emit_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        let first = log.clone();
        listeners.subscribe(move |e| first.borrow_mut().push(format!("1:{:?}", e)));
        let second = log.clone();
        listeners.subscribe(move |e| second.borrow_mut().push(format!("2:{:?}", e)));

        listeners.emit(&StyleEvent::StylesheetChanged);
        assert_eq!(
            *log.borrow(),
            vec!["1:StylesheetChanged", "2:StylesheetChanged"]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        let counter = count.clone();
        let id = listeners.subscribe(move |_| *counter.borrow_mut() += 1);

        listeners.emit(&StyleEvent::ThemeChanged("dark".into()));
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&StyleEvent::ThemeChanged("light".into()));

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }
}
