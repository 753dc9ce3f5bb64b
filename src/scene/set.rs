//! Several independent scenes with one selected for drawing.

use super::{Scene, SceneId};

struct SetEntry {
    name: String,
    scene: Scene,
}

/// Independent scene roots, exactly one active.
///
/// Switching only changes the selection; inactive scenes are kept intact.
#[derive(Default)]
pub struct SceneSet {
    entries: Vec<SetEntry>,
    active: Option<usize>,
}

impl SceneSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scene. The first scene added becomes active.
    pub fn add(&mut self, name: impl Into<String>, scene: Scene) -> SceneId {
        let id = scene.id();
        self.entries.push(SetEntry {
            name: name.into(),
            scene,
        });
        if self.active.is_none() {
            self.active = Some(self.entries.len() - 1);
        }
        id
    }

    /// Number of scenes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set has no scenes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, id: SceneId) -> Option<usize> {
        self.entries.iter().position(|e| e.scene.id() == id)
    }

    /// Select the scene to render. Returns `false` for an unknown id.
    pub fn switch_to(&mut self, id: SceneId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    /// Select a scene by name.
    pub fn switch_to_name(&mut self, name: &str) -> Option<SceneId> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        self.active = Some(index);
        Some(self.entries[index].scene.id())
    }

    /// Id of the active scene.
    pub fn active_id(&self) -> Option<SceneId> {
        self.active.map(|i| self.entries[i].scene.id())
    }

    /// The active scene.
    pub fn active(&self) -> Option<&Scene> {
        self.active.map(|i| &self.entries[i].scene)
    }

    /// The active scene, mutably.
    pub fn active_mut(&mut self) -> Option<&mut Scene> {
        match self.active {
            Some(i) => Some(&mut self.entries[i].scene),
            None => None,
        }
    }

    /// Look up a scene.
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.index_of(id).map(|i| &self.entries[i].scene)
    }

    /// Look up a scene mutably.
    pub fn get_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        let index = self.index_of(id)?;
        Some(&mut self.entries[index].scene)
    }

    /// Find a scene id by name.
    pub fn find(&self, name: &str) -> Option<SceneId> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.scene.id())
    }

    /// Iterate over all scenes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scene)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.scene))
    }
}
