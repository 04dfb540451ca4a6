//! Headless backend.
//!
//! Keeps every resource in plain maps instead of on a GPU. Used by the
//! viewer when no display is attached and by tests to observe resource
//! churn.

use std::collections::HashMap;

use super::{LabelHandle, Material, MeshHandle, SceneBackend, Transform};
use crate::camera::{Camera, ScreenPoint};
use crate::geometry::ShapeGeometry;

/// A live mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshRecord {
    /// Current geometry.
    pub geometry: ShapeGeometry,
    /// Current material.
    pub material: Material,
    /// Last transform set.
    pub transform: Transform,
}

/// A live label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRecord {
    /// Label text.
    pub text: String,
    /// Where it is shown; `None` while hidden.
    pub placement: Option<ScreenPoint>,
}

/// Lifetime resource counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackendStats {
    /// Meshes added.
    pub meshes_created: u64,
    /// Meshes removed.
    pub meshes_removed: u64,
    /// Geometries built (creation and rebuilds).
    pub geometry_builds: u64,
    /// Geometries released (rebuilds and removals).
    pub geometry_releases: u64,
    /// Material writes after creation.
    pub material_updates: u64,
    /// Labels added.
    pub labels_created: u64,
    /// Labels removed.
    pub labels_removed: u64,
    /// Draw calls issued.
    pub frames_drawn: u64,
}

/// Backend that renders nothing.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    meshes: HashMap<MeshHandle, MeshRecord>,
    labels: HashMap<LabelHandle, LabelRecord>,
    next_handle: u64,
    stats: BackendStats,
}

impl HeadlessBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live mesh.
    #[must_use]
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshRecord> {
        self.meshes.get(&handle)
    }

    /// Looks up a live label.
    #[must_use]
    pub fn label(&self, handle: LabelHandle) -> Option<&LabelRecord> {
        self.labels.get(&handle)
    }

    /// Number of meshes in the scene.
    #[must_use]
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Number of labels in the overlay.
    #[must_use]
    pub fn live_labels(&self) -> usize {
        self.labels.len()
    }

    /// Resource counters.
    #[must_use]
    pub const fn stats(&self) -> &BackendStats {
        &self.stats
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl SceneBackend for HeadlessBackend {
    fn create_mesh(
        &mut self,
        geometry: &ShapeGeometry,
        material: &Material,
        transform: &Transform,
    ) -> MeshHandle {
        let handle = MeshHandle(self.allocate());
        self.meshes.insert(
            handle,
            MeshRecord {
                geometry: *geometry,
                material: *material,
                transform: *transform,
            },
        );
        self.stats.meshes_created += 1;
        self.stats.geometry_builds += 1;
        handle
    }

    fn rebuild_geometry(&mut self, mesh: MeshHandle, geometry: &ShapeGeometry) {
        match self.meshes.get_mut(&mesh) {
            Some(record) => {
                record.geometry = *geometry;
                self.stats.geometry_releases += 1;
                self.stats.geometry_builds += 1;
            }
            None => tracing::warn!("Geometry rebuild for unknown mesh {:?}", mesh),
        }
    }

    fn set_material(&mut self, mesh: MeshHandle, material: &Material) {
        if let Some(record) = self.meshes.get_mut(&mesh) {
            record.material = *material;
            self.stats.material_updates += 1;
        }
    }

    fn set_transform(&mut self, mesh: MeshHandle, transform: &Transform) {
        if let Some(record) = self.meshes.get_mut(&mesh) {
            record.transform = *transform;
        }
    }

    fn remove_mesh(&mut self, mesh: MeshHandle) {
        if self.meshes.remove(&mesh).is_some() {
            self.stats.meshes_removed += 1;
            self.stats.geometry_releases += 1;
        } else {
            tracing::warn!("Removal of unknown mesh {:?}", mesh);
        }
    }

    fn create_label(&mut self, text: &str) -> LabelHandle {
        let handle = LabelHandle(self.allocate());
        self.labels.insert(
            handle,
            LabelRecord {
                text: text.to_owned(),
                placement: None,
            },
        );
        self.stats.labels_created += 1;
        handle
    }

    fn place_label(&mut self, label: LabelHandle, placement: Option<ScreenPoint>) {
        if let Some(record) = self.labels.get_mut(&label) {
            record.placement = placement;
        }
    }

    fn remove_label(&mut self, label: LabelHandle) {
        if self.labels.remove(&label).is_some() {
            self.stats.labels_removed += 1;
        } else {
            tracing::warn!("Removal of unknown label {:?}", label);
        }
    }

    fn draw(&mut self, _camera: &Camera) {
        self.stats.frames_drawn += 1;
        tracing::trace!(
            "Frame {}: {} meshes, {} labels",
            self.stats.frames_drawn,
            self.meshes.len(),
            self.labels.len()
        );
    }
}
