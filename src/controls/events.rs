//! Change notification for interactive controls.

use std::fmt;

/// Handle returned by [`ChangeListeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callbacks run whenever a control changes the camera.
#[derive(Default)]
pub struct ChangeListeners {
    next: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut()>)>,
}

impl ChangeListeners {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of registered callbacks.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every callback.
    pub fn emit(&mut self) {
        for (_, callback) in &mut self.entries {
            callback();
        }
    }
}

impl fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_unsubscribe_unknown_is_false() {
        let mut listeners = ChangeListeners::new();
        let id = listeners.subscribe(|| {});
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_emit_runs_all() {
        let hits = Rc::new(Cell::new(0));
        let mut listeners = ChangeListeners::new();
        for _ in 0..3 {
            let hits = hits.clone();
            listeners.subscribe(move || hits.set(hits.get() + 1));
        }
        listeners.emit();
        assert_eq!(hits.get(), 3);
    }
}
