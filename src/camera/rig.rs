//! The set of cameras a harness can render through.

use super::{Camera, CameraId};

struct RigEntry {
    name: String,
    camera: Camera,
}

/// Named cameras with exactly one active at a time.
///
/// Activating a camera is a pure selection: every camera stays owned by the
/// rig and keeps receiving resize updates.
#[derive(Default)]
pub struct CameraRig {
    entries: Vec<RigEntry>,
    active: Option<usize>,
}

impl CameraRig {
    /// Create an empty rig.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a camera. The first camera added becomes active.
    pub fn add(&mut self, name: impl Into<String>, camera: impl Into<Camera>) -> CameraId {
        let camera = camera.into();
        let id = camera.id();
        self.entries.push(RigEntry {
            name: name.into(),
            camera,
        });
        if self.active.is_none() {
            self.active = Some(self.entries.len() - 1);
        }
        id
    }

    /// Number of cameras.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the rig has no cameras.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, id: CameraId) -> Option<usize> {
        self.entries.iter().position(|e| e.camera.id() == id)
    }

    /// Select the active camera. Returns `false` for an unknown id.
    pub fn set_active(&mut self, id: CameraId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    /// Select the active camera by name.
    pub fn set_active_by_name(&mut self, name: &str) -> Option<CameraId> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        self.active = Some(index);
        Some(self.entries[index].camera.id())
    }

    /// Id of the active camera.
    pub fn active_id(&self) -> Option<CameraId> {
        self.active.map(|i| self.entries[i].camera.id())
    }

    /// The active camera.
    pub fn active(&self) -> Option<&Camera> {
        self.active.map(|i| &self.entries[i].camera)
    }

    /// The active camera, mutably.
    pub fn active_mut(&mut self) -> Option<&mut Camera> {
        match self.active {
            Some(i) => Some(&mut self.entries[i].camera),
            None => None,
        }
    }

    /// Look up a camera.
    pub fn get(&self, id: CameraId) -> Option<&Camera> {
        self.index_of(id).map(|i| &self.entries[i].camera)
    }

    /// Look up a camera mutably.
    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        let index = self.index_of(id)?;
        Some(&mut self.entries[index].camera)
    }

    /// Find a camera id by name.
    pub fn find(&self, name: &str) -> Option<CameraId> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.camera.id())
    }

    /// Name a camera was registered under.
    pub fn name_of(&self, id: CameraId) -> Option<&str> {
        self.index_of(id).map(|i| self.entries[i].name.as_str())
    }

    /// Iterate over all cameras.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Camera)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.camera))
    }

    /// Iterate mutably over all cameras.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Camera> {
        self.entries.iter_mut().map(|e| &mut e.camera)
    }
}
