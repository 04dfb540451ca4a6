//! # Render Backend
//!
//! The seam between scene bookkeeping and whatever draws it.
//!
//! The reconciler owns *which* visual resources exist; the backend owns
//! *what* they are. Every resource a backend hands out is released through
//! the same backend exactly once.
//!
//! ```text
//! SceneReconciler ──create/rebuild/remove──► SceneBackend
//! RenderLoop      ──transform/label/draw───► SceneBackend
//! ```

mod headless;

pub use headless::{BackendStats, HeadlessBackend, LabelRecord, MeshRecord};

use scene_relay_shared::{Color, Part, Vec3};

use crate::camera::{Camera, ScreenPoint};
use crate::geometry::ShapeGeometry;

/// Handle to a mesh (geometry + material) owned by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Handle to a 2D label owned by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelHandle(pub u64);

/// Surface appearance. Cheap to re-set every poll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base colour.
    pub color: Color,
    /// 1 is opaque.
    pub opacity: f32,
    /// Needs blending.
    pub transparent: bool,
}

impl Material {
    /// Material described by a part.
    #[must_use]
    pub fn for_part(part: &Part) -> Self {
        Self {
            color: part.color,
            opacity: part.opacity(),
            transparent: part.transparency > 0.0,
        }
    }
}

/// Position and orientation. Rotation is Euler XYZ in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
}

impl Transform {
    /// Transform described by a part (rotation converted from degrees).
    #[must_use]
    pub fn for_part(part: &Part) -> Self {
        Self {
            position: part.pos,
            rotation: part.rotation.to_radians(),
        }
    }
}

/// A renderer the scene can be drawn with.
pub trait SceneBackend {
    /// Builds geometry and material and adds the mesh to the scene.
    fn create_mesh(
        &mut self,
        geometry: &ShapeGeometry,
        material: &Material,
        transform: &Transform,
    ) -> MeshHandle;

    /// Releases the mesh's geometry and builds a new one in its place.
    fn rebuild_geometry(&mut self, mesh: MeshHandle, geometry: &ShapeGeometry);

    /// Updates the mesh's material in place.
    fn set_material(&mut self, mesh: MeshHandle, material: &Material);

    /// Moves the mesh.
    fn set_transform(&mut self, mesh: MeshHandle, transform: &Transform);

    /// Removes the mesh from the scene and releases geometry and material.
    fn remove_mesh(&mut self, mesh: MeshHandle);

    /// Creates a screen-space text label, initially hidden.
    fn create_label(&mut self, text: &str) -> LabelHandle;

    /// Shows the label at a pixel position, or hides it with `None`.
    fn place_label(&mut self, label: LabelHandle, placement: Option<ScreenPoint>);

    /// Removes and releases the label.
    fn remove_label(&mut self, label: LabelHandle);

    /// Draws the scene as seen from `camera`.
    fn draw(&mut self, camera: &Camera);
}
