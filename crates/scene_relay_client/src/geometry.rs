//! Type-to-geometry mapping.
//!
//! A [`ShapeGeometry`] describes what the backend has to build for a part;
//! building the actual mesh is the backend's business.

use scene_relay_shared::{Part, PartType, Vec3};

/// Geometry parameters for one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeGeometry {
    /// Axis-aligned box, full extents.
    Box {
        /// X extent.
        width: f32,
        /// Y extent.
        height: f32,
        /// Z extent.
        depth: f32,
    },
    /// Sphere.
    Sphere {
        /// Radius.
        radius: f32,
    },
    /// Upright cylinder.
    Cylinder {
        /// Radius of both caps.
        radius: f32,
        /// Y extent.
        height: f32,
    },
    /// Ramp.
    Wedge {
        /// Base extent.
        base: f32,
        /// Rise.
        height: f32,
    },
    /// Corner ramp.
    CornerWedge {
        /// X extent.
        width: f32,
        /// Y extent.
        height: f32,
        /// Z extent.
        depth: f32,
    },
}

impl ShapeGeometry {
    /// Derives the geometry for a shape and size.
    ///
    /// Negative size components are clamped to zero.
    #[must_use]
    pub fn for_shape(part_type: PartType, size: Vec3) -> Self {
        let size = size.map(|c| c.max(0.0));
        match part_type {
            PartType::Block => Self::Box {
                width: size.x,
                height: size.y,
                depth: size.z,
            },
            PartType::Ball => Self::Sphere { radius: size.x / 2.0 },
            PartType::Cylinder => Self::Cylinder {
                radius: size.x / 2.0,
                height: size.y,
            },
            PartType::Wedge => Self::Wedge {
                base: size.x,
                height: size.y,
            },
            PartType::CornerWedge => Self::CornerWedge {
                width: size.x,
                height: size.y,
                depth: size.z,
            },
        }
    }

    /// Derives the geometry for a part.
    #[must_use]
    pub fn for_part(part: &Part) -> Self {
        Self::for_shape(part.part_type, part.size)
    }

    /// Vertical extent, used to float labels above the shape.
    #[must_use]
    pub fn height(&self) -> f32 {
        match *self {
            Self::Sphere { radius } => radius * 2.0,
            Self::Box { height, .. }
            | Self::Cylinder { height, .. }
            | Self::Wedge { height, .. }
            | Self::CornerWedge { height, .. } => height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        let size = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(
            ShapeGeometry::for_shape(PartType::Block, size),
            ShapeGeometry::Box { width: 2.0, height: 4.0, depth: 6.0 }
        );
        assert_eq!(
            ShapeGeometry::for_shape(PartType::Ball, size),
            ShapeGeometry::Sphere { radius: 1.0 }
        );
        assert_eq!(
            ShapeGeometry::for_shape(PartType::Cylinder, size),
            ShapeGeometry::Cylinder { radius: 1.0, height: 4.0 }
        );
        assert_eq!(
            ShapeGeometry::for_shape(PartType::Wedge, size),
            ShapeGeometry::Wedge { base: 2.0, height: 4.0 }
        );
    }

    #[test]
    fn test_negative_size_clamped() {
        let geometry = ShapeGeometry::for_shape(PartType::Block, Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(geometry, ShapeGeometry::Box { width: 0.0, height: 2.0, depth: 0.0 });
    }

    #[test]
    fn test_height() {
        assert_eq!(ShapeGeometry::Sphere { radius: 1.5 }.height(), 3.0);
        assert_eq!(
            ShapeGeometry::for_shape(PartType::CornerWedge, Vec3::new(1.0, 5.0, 1.0)).height(),
            5.0
        );
    }
}
