//! Loading manager for tracking multiple asset loads.

use super::LoadError;

/// Loading state of one item or of the whole manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Not started.
    #[default]
    Idle,
    /// Currently loading.
    Loading,
    /// Successfully loaded.
    Loaded,
    /// Failed to load.
    Failed,
}

/// Snapshot of a manager's progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadProgress {
    /// Items finished, successfully or not.
    pub loaded: usize,
    /// Items registered.
    pub total: usize,
    /// An item still in flight.
    pub current_item: Option<String>,
    /// First error seen.
    pub error: Option<String>,
}

impl LoadProgress {
    /// Progress as a fraction (0.0 - 1.0).
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }

    /// Check if every item finished.
    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

/// Tracks progress over a set of urls.
///
/// Items are kept in registration order so progress reports are stable.
#[derive(Debug, Default)]
pub struct LoadingManager {
    items: Vec<(String, LoadState)>,
    errors: Vec<String>,
    state: LoadState,
}

impl LoadingManager {
    /// Create a new loading manager.
    pub fn new() -> Self {
        Self::default()
    }

    fn finished(&self) -> usize {
        self.items
            .iter()
            .filter(|(_, s)| matches!(s, LoadState::Loaded | LoadState::Failed))
            .count()
    }

    fn item_mut(&mut self, url: &str) -> Option<&mut LoadState> {
        self.items
            .iter_mut()
            .find(|(u, s)| u == url && *s == LoadState::Loading)
            .map(|(_, s)| s)
    }

    /// Start tracking an item.
    pub fn item_start(&mut self, url: impl Into<String>) {
        let url = url.into();
        log::debug!("loading {url}");
        self.items.push((url, LoadState::Loading));
        self.state = LoadState::Loading;
    }

    /// Mark an item as successfully loaded.
    pub fn item_end(&mut self, url: &str) {
        if let Some(state) = self.item_mut(url) {
            *state = LoadState::Loaded;
            self.update_state();
        }
    }

    /// Mark an item as failed. One failure fails the whole set.
    pub fn item_error(&mut self, url: &str, error: &LoadError) {
        if let Some(state) = self.item_mut(url) {
            *state = LoadState::Failed;
            log::warn!("{error}");
            self.errors.push(error.to_string());
            self.update_state();
        }
    }

    /// Give up on every item still loading. They count as failed.
    pub fn abandon_pending(&mut self) {
        let mut abandoned = 0;
        for (url, state) in self.items.iter_mut().filter(|(_, s)| *s == LoadState::Loading) {
            log::debug!("abandoned {url}");
            *state = LoadState::Failed;
            abandoned += 1;
        }
        if abandoned > 0 {
            self.state = LoadState::Failed;
        }
    }

    fn update_state(&mut self) {
        if !self.errors.is_empty() {
            self.state = LoadState::Failed;
        } else if self.finished() == self.items.len() {
            self.state = LoadState::Loaded;
        }
    }

    /// Get current overall state.
    #[inline]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Check if all items are loaded.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Check if loading is in progress.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Get all errors.
    #[inline]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get progress information.
    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            loaded: self.finished(),
            total: self.items.len(),
            current_item: self
                .items
                .iter()
                .find(|(_, s)| *s == LoadState::Loading)
                .map(|(u, _)| u.clone()),
            error: self.errors.first().cloned(),
        }
    }

    /// Forget every item.
    pub fn reset(&mut self) {
        self.items.clear();
        self.errors.clear();
        self.state = LoadState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts_failures_as_finished() {
        let mut manager = LoadingManager::new();
        manager.item_start("a.glb");
        manager.item_start("b.hdr");
        assert!(manager.is_loading());
        assert_eq!(manager.progress().current_item.as_deref(), Some("a.glb"));

        manager.item_end("a.glb");
        assert_eq!(manager.progress().fraction(), 0.5);
        assert!(manager.is_loading());

        manager.item_error("b.hdr", &LoadError::NotFound("b.hdr".into()));
        assert_eq!(manager.state(), LoadState::Failed);
        assert!(manager.progress().is_complete());
        assert_eq!(manager.errors().len(), 1);
    }

    #[test]
    fn test_abandon_pending() {
        let mut manager = LoadingManager::new();
        for url in ["a.glb", "b.hdr", "c.png"] {
            manager.item_start(url);
        }
        manager.item_end("a.glb");
        manager.item_error("b.hdr", &LoadError::NotFound("b.hdr".into()));
        assert_eq!(manager.progress().current_item.as_deref(), Some("c.png"));

        manager.abandon_pending();
        let progress = manager.progress();
        assert_eq!(manager.state(), LoadState::Failed);
        assert_eq!((progress.loaded, progress.total), (3, 3));
        assert_eq!(progress.current_item, None);
        assert_eq!(manager.errors().len(), 1);

        // late completions are ignored
        manager.item_end("c.png");
        assert_eq!(manager.state(), LoadState::Failed);
    }

    #[test]
    fn test_same_url_twice() {
        let mut manager = LoadingManager::new();
        manager.item_start("wheel.glb");
        manager.item_start("wheel.glb");
        manager.item_end("wheel.glb");
        assert!(manager.is_loading());
        manager.item_end("wheel.glb");
        assert!(manager.is_loaded());
    }
}
