//! Perspective camera used to place labels in screen space.
//!
//! Orientation follows the usual fly-camera convention: yaw about Y, then
//! pitch about X, no roll (`YXZ` order). At yaw = pitch = 0 the camera looks
//! down `-Z`.

use glam::{EulerRot, Mat4, Quat, Vec4};
use scene_relay_shared::Vec3;

/// Pixel position on the viewport, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// Pixels from the left edge.
    pub x: f32,
    /// Pixels from the top edge.
    pub y: f32,
}

/// Perspective camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Rotation about Y in radians.
    pub yaw: f32,
    /// Rotation about X in radians, clamped to ±90°.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
}

impl Camera {
    /// Creates a camera at the origin looking down `-Z`.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov_y_deg: 70.0,
            near: 0.1,
            far: 1000.0,
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    /// Places the camera. Angles in degrees.
    pub fn look_from(&mut self, position: Vec3, yaw_deg: f32, pitch_deg: f32) {
        self.position = position;
        self.yaw = yaw_deg.to_radians();
        self.pitch = pitch_deg
            .to_radians()
            .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }

    fn view_projection(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        let eye = glam::Vec3::from_array(self.position.to_array());
        let view = Mat4::from_rotation_translation(rotation, eye).inverse();
        let projection = Mat4::perspective_rh_gl(
            self.fov_y_deg.to_radians(),
            self.width / self.height,
            self.near,
            self.far,
        );
        projection * view
    }

    /// Projects a world point to pixels.
    ///
    /// Returns `None` when the point is behind the camera or past the far
    /// plane.
    #[must_use]
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.z >= 1.0 {
            return None;
        }
        Some(ScreenPoint {
            x: (ndc.x * 0.5 + 0.5) * self.width,
            y: (-ndc.y * 0.5 + 0.5) * self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let camera = Camera::new(800, 600);
        let point = camera.project(Vec3::new(0.0, 0.0, -10.0)).unwrap();
        assert!(close(point.x, 400.0));
        assert!(close(point.y, 300.0));
    }

    #[test]
    fn test_axes_orientation() {
        let camera = Camera::new(800, 600);
        let right = camera.project(Vec3::new(2.0, 0.0, -10.0)).unwrap();
        let up = camera.project(Vec3::new(0.0, 2.0, -10.0)).unwrap();
        assert!(right.x > 400.0);
        assert!(up.y < 300.0, "screen y grows downwards");
    }

    #[test]
    fn test_behind_camera_hidden() {
        let camera = Camera::new(800, 600);
        assert!(camera.project(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_past_far_plane_hidden() {
        let camera = Camera::new(800, 600);
        assert!(camera.project(Vec3::new(0.0, 0.0, -5000.0)).is_none());
    }

    #[test]
    fn test_yaw_turns_view() {
        let mut camera = Camera::new(800, 600);
        // Turned to face -X.
        camera.look_from(Vec3::ZERO, 90.0, 0.0);
        assert!(camera.project(Vec3::new(-10.0, 0.0, 0.0)).is_some());
        assert!(camera.project(Vec3::new(10.0, 0.0, 0.0)).is_none());
    }
}
