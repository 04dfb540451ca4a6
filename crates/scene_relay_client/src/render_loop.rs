//! # Render Loop
//!
//! Per-frame animation, independent of the poll cadence.
//!
//! Each frame moves every object a fraction of the way from its current
//! transform to its target (exponential smoothing), issues one draw, and
//! then repositions the labels of player objects in screen space.
//!
//! ## Frame-rate independence
//!
//! A fixed fraction per callback makes motion speed depend on the display
//! rate. The fraction is instead defined per *reference frame* (1/60 s) and
//! scaled by the real elapsed time:
//!
//! ```text
//! alpha(dt) = 1 - (1 - fraction)^(dt / reference_frame)
//! ```
//!
//! Two 30 Hz frames therefore cover the same distance as four 60 Hz ones.

use crate::backend::SceneBackend;
use crate::camera::Camera;
use crate::reconciler::SceneReconciler;

/// Exponential decay towards a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothing {
    /// Share of the remaining distance covered per reference frame.
    pub fraction: f32,
    /// Length of the reference frame in seconds.
    pub reference_frame: f32,
}

impl Smoothing {
    /// Fraction per 1/60 s.
    #[must_use]
    pub const fn per_sixtieth(fraction: f32) -> Self {
        Self {
            fraction,
            reference_frame: 1.0 / 60.0,
        }
    }

    /// Share of the remaining distance to cover after `dt` seconds.
    #[must_use]
    pub fn factor(&self, dt: f32) -> f32 {
        if dt <= 0.0 || self.reference_frame <= 0.0 {
            return 0.0;
        }
        let fraction = self.fraction.clamp(0.0, 1.0);
        1.0 - (1.0 - fraction).powf(dt / self.reference_frame)
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::per_sixtieth(0.2)
    }
}

/// What one frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Smoothing factor applied.
    pub alpha: f32,
    /// Objects animated.
    pub objects: u32,
    /// Labels shown.
    pub labels_visible: u32,
    /// Labels hidden (behind the camera or out of range).
    pub labels_hidden: u32,
}

/// Per-frame driver.
#[derive(Clone, Debug)]
pub struct RenderLoop {
    smoothing: Smoothing,
    label_margin: f32,
    frames: u64,
}

impl RenderLoop {
    /// Creates a loop with the given smoothing and label margin.
    #[must_use]
    pub fn new(smoothing: Smoothing, label_margin: f32) -> Self {
        Self {
            smoothing,
            label_margin,
            frames: 0,
        }
    }

    /// Frames rendered so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame, `dt` seconds after the previous one.
    pub fn frame<B: SceneBackend + ?Sized>(
        &mut self,
        dt: f32,
        scene: &mut SceneReconciler,
        backend: &mut B,
        camera: &Camera,
    ) -> FrameStats {
        let alpha = self.smoothing.factor(dt);
        let mut stats = FrameStats {
            alpha,
            ..FrameStats::default()
        };

        for object in scene.iter_mut() {
            let mesh = object.mesh();
            let transform = *object.advance(alpha);
            backend.set_transform(mesh, &transform);
            stats.objects += 1;
        }

        backend.draw(camera);

        for object in scene.iter() {
            let Some(label) = object.label() else {
                continue;
            };
            let placement = camera.project(object.label_anchor(self.label_margin));
            if placement.is_some() {
                stats.labels_visible += 1;
            } else {
                stats.labels_hidden += 1;
            }
            backend.place_label(label, placement);
        }

        self.frames += 1;
        stats
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(Smoothing::default(), 1.0)
    }
}
