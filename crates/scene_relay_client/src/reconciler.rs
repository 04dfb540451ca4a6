//! # Scene Reconciler
//!
//! Keeps the set of rendered objects in step with the latest snapshot.
//!
//! ## Lifecycle
//!
//! ```text
//!            id appears            id present             id missing
//! snapshot ──────────────► CREATE ───────────► UPDATE ───────────────► RELEASE
//!                          mesh + label         target transform,       mesh + label
//!                                               material, geometry      freed
//!                                               if type/size changed
//! ```
//!
//! Stale objects are released before anything else happens in a pass, so
//! an id that vanishes and comes back never inherits old resources.
//!
//! ## Duplicate ids
//!
//! When an id occurs more than once in a snapshot, only its last entry is
//! applied. Reconciling the same snapshot twice therefore never rebuilds
//! geometry or recreates labels, duplicates or not.

use std::collections::HashMap;

use scene_relay_shared::{Part, PartId, PartType, Vec3};

use crate::backend::{LabelHandle, Material, MeshHandle, SceneBackend, Transform};
use crate::geometry::ShapeGeometry;

/// Client-side state for one tracked part.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedObject {
    id: PartId,
    part_type: PartType,
    size: Vec3,
    geometry: ShapeGeometry,
    material: Material,
    current: Transform,
    target: Transform,
    mesh: MeshHandle,
    label: Option<LabelHandle>,
}

impl RenderedObject {
    fn create<B: SceneBackend + ?Sized>(part: &Part, backend: &mut B) -> Self {
        let geometry = ShapeGeometry::for_part(part);
        let material = Material::for_part(part);
        let transform = Transform::for_part(part);
        let mesh = backend.create_mesh(&geometry, &material, &transform);
        let label = part.is_player.then(|| backend.create_label(&part.id));

        Self {
            id: part.id.clone(),
            part_type: part.part_type,
            size: part.size,
            geometry,
            material,
            current: transform,
            target: transform,
            mesh,
            label,
        }
    }

    /// Applies a newer version of the part. Returns true if the geometry
    /// had to be rebuilt.
    fn update<B: SceneBackend + ?Sized>(&mut self, part: &Part, backend: &mut B) -> bool {
        self.target = Transform::for_part(part);

        let rebuilt = part.part_type != self.part_type || part.size != self.size;
        if rebuilt {
            self.part_type = part.part_type;
            self.size = part.size;
            self.geometry = ShapeGeometry::for_part(part);
            backend.rebuild_geometry(self.mesh, &self.geometry);
        }

        self.material = Material::for_part(part);
        backend.set_material(self.mesh, &self.material);

        match (part.is_player, self.label) {
            (true, None) => self.label = Some(backend.create_label(&self.id)),
            (false, Some(label)) => {
                backend.remove_label(label);
                self.label = None;
            }
            _ => {}
        }

        rebuilt
    }

    fn release<B: SceneBackend + ?Sized>(&mut self, backend: &mut B) {
        backend.remove_mesh(self.mesh);
        if let Some(label) = self.label.take() {
            backend.remove_label(label);
        }
    }

    /// Moves the current transform `alpha` of the way to the target, each
    /// position and rotation component independently.
    pub fn advance(&mut self, alpha: f32) -> &Transform {
        self.current.position = self.current.position.lerp(self.target.position, alpha);
        self.current.rotation = self.current.rotation.lerp(self.target.rotation, alpha);
        &self.current
    }

    /// World point a label floats at: above the object's top by `margin`.
    #[must_use]
    pub fn label_anchor(&self, margin: f32) -> Vec3 {
        self.current.position + Vec3::Y * (self.geometry.height() / 2.0 + margin)
    }

    /// Part id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Shape the geometry was built for.
    #[must_use]
    pub const fn part_type(&self) -> PartType {
        self.part_type
    }

    /// Size the geometry was built for.
    #[must_use]
    pub const fn size(&self) -> Vec3 {
        self.size
    }

    /// Current geometry.
    #[must_use]
    pub const fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    /// Current material.
    #[must_use]
    pub const fn material(&self) -> &Material {
        &self.material
    }

    /// Interpolated transform on screen.
    #[must_use]
    pub const fn current(&self) -> &Transform {
        &self.current
    }

    /// Latest transform from the snapshot.
    #[must_use]
    pub const fn target(&self) -> &Transform {
        &self.target
    }

    /// Backend mesh.
    #[must_use]
    pub const fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Backend label, for player parts.
    #[must_use]
    pub const fn label(&self) -> Option<LabelHandle> {
        self.label
    }
}

/// What one reconcile pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Objects created for new ids.
    pub created: u32,
    /// Updates applied to already tracked ids.
    pub updated: u32,
    /// Updates that replaced geometry.
    pub rebuilt: u32,
    /// Objects released for vanished ids.
    pub removed: u32,
}

impl ReconcileStats {
    /// True if objects were created or released.
    #[must_use]
    pub const fn changed_membership(&self) -> bool {
        self.created > 0 || self.removed > 0
    }
}

/// Owner of every rendered object, keyed by part id.
#[derive(Debug, Default)]
pub struct SceneReconciler {
    objects: HashMap<PartId, RenderedObject>,
}

impl SceneReconciler {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the tracked set in line with `parts`.
    ///
    /// Afterwards the tracked ids are exactly the distinct ids of `parts`.
    pub fn reconcile<B: SceneBackend + ?Sized>(
        &mut self,
        parts: &[Part],
        backend: &mut B,
    ) -> ReconcileStats {
        let mut stats = ReconcileStats::default();

        // Duplicate ids collapse to the last entry.
        let mut latest: HashMap<&str, &Part> = HashMap::with_capacity(parts.len());
        for part in parts {
            latest.insert(part.id.as_str(), part);
        }

        self.objects.retain(|id, object| {
            if latest.contains_key(id.as_str()) {
                return true;
            }
            object.release(backend);
            stats.removed += 1;
            false
        });

        for part in latest.into_values() {
            if let Some(object) = self.objects.get_mut(&part.id) {
                if object.update(part, backend) {
                    stats.rebuilt += 1;
                }
                stats.updated += 1;
            } else {
                let object = RenderedObject::create(part, backend);
                self.objects.insert(part.id.clone(), object);
                stats.created += 1;
            }
        }

        if stats.changed_membership() || stats.rebuilt > 0 {
            tracing::debug!(
                "Reconciled {} parts: +{} -{} rebuilt {}",
                self.objects.len(),
                stats.created,
                stats.removed,
                stats.rebuilt
            );
        }
        stats
    }

    /// Releases every object.
    pub fn clear<B: SceneBackend + ?Sized>(&mut self, backend: &mut B) {
        for (_, mut object) in self.objects.drain() {
            object.release(backend);
        }
    }

    /// Looks up a tracked object.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RenderedObject> {
        self.objects.get(id)
    }

    /// True if `id` is tracked.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Tracked ids, unordered.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Tracked objects, unordered.
    pub fn iter(&self) -> impl Iterator<Item = &RenderedObject> {
        self.objects.values()
    }

    /// Tracked objects for per-frame animation.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RenderedObject> {
        self.objects.values_mut()
    }

    /// Number of tracked objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
