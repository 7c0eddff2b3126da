//! # Localisation types
//!
//! Pose estimation itself is an external collaborator - this module only
//! defines the pose type that the estimator produces. The pose is refreshed
//! every control cycle and passed into the planning and shooting functions as
//! an argument, no component holds onto a stale copy.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and heading in the field frame) of the robot.
///
/// Positions are in metres with the origin at the blue alliance corner of the
/// field. Heading is in radians, zero along the field +X axis, positive
/// counter-clockwise.
#[derive(Debug, Copy, Clone, Deserialize, Default)]
pub struct Pose {
    /// The position in the field frame
    pub position_m: Vector2<f64>,

    /// The heading in the field frame
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            heading_rad,
        }
    }

    /// Horizontal (ground plane) distance from the robot to a field point.
    pub fn distance_to_m(&self, target_m: &Vector2<f64>) -> f64 {
        (target_m - self.position_m).norm()
    }
}
