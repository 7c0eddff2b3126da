//! Launch point geometry
//!
//! The launcher pivots on an arm mounted off the drivetrain centre, so the
//! point a note actually leaves the robot moves as the arm angle changes.
//! These functions give that launch point, either relative to the target
//! (distance along the line of fire, height above the floor) or in field
//! coordinates. Closed-form trigonometry only - the solver calls these once
//! per iteration.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Vector2, Vector3};

// Internal
use super::LaunchGeometry;
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Position of the launch point relative to the target.
///
/// `robot_distance_m` is the horizontal distance from the drivetrain centre
/// to the target. Returns x = horizontal distance from the launch point to
/// the target, y = height of the launch point above the floor.
pub fn launch_point_target_relative(
    geom: &LaunchGeometry,
    robot_distance_m: f64,
    arm_angle_rad: f64,
) -> Vector2<f64> {
    let (sin, cos) = arm_angle_rad.sin_cos();

    let vertical_m = -sin * geom.arm_length_m + cos * geom.arm_to_wheels_length_m
        + geom.vertical_offset_m;

    let horizontal_m = cos * geom.arm_length_m + sin * geom.arm_to_wheels_length_m
        + geom.horizontal_offset_m;

    Vector2::new(robot_distance_m + horizontal_m, vertical_m)
}

/// Position of the launch point in field coordinates.
///
/// The horizontal offset is rotated by the robot's heading into the field
/// frame and added to the robot's field position; z is the height above the
/// floor.
pub fn launch_point_field(
    geom: &LaunchGeometry,
    pose: &Pose,
    arm_angle_rad: f64,
) -> Vector3<f64> {
    let (sin, cos) = arm_angle_rad.sin_cos();

    let vertical_m = -sin * geom.arm_length_m + cos * geom.arm_to_wheels_length_m
        + geom.vertical_offset_m;

    let horizontal_m = cos * geom.arm_length_m + sin * geom.arm_to_wheels_length_m
        + geom.horizontal_offset_m;

    let x_offset_m = horizontal_m * pose.heading_rad.cos();
    let y_offset_m = horizontal_m * pose.heading_rad.sin();

    Vector3::new(
        pose.position_m.x + x_offset_m,
        pose.position_m.y + y_offset_m,
        vertical_m,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn test_geom() -> LaunchGeometry {
        LaunchGeometry {
            arm_length_m: 0.22,
            arm_to_wheels_length_m: 0.05,
            vertical_offset_m: 0.28,
            horizontal_offset_m: 0.0,
        }
    }

    #[test]
    fn test_launch_point_at_zero_angle() {
        let geom = test_geom();
        let point = launch_point_target_relative(&geom, 2.0, 0.0);

        // At zero arm angle the arm lies flat: full arm length forwards,
        // wheel offset straight up
        assert_relative_eq!(point.x, 2.0 + 0.22, epsilon = 1e-9);
        assert_relative_eq!(point.y, 0.28 + 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_launch_point_at_vertical_angle() {
        let geom = test_geom();
        let point =
            launch_point_target_relative(&geom, 2.0, std::f64::consts::FRAC_PI_2);

        // Arm straight up: launch point drops by the arm length, wheel
        // offset goes forwards
        assert_relative_eq!(point.x, 2.0 + 0.05, epsilon = 1e-9);
        assert_relative_eq!(point.y, 0.28 - 0.22, epsilon = 1e-9);
    }

    #[test]
    fn test_field_point_rotates_with_heading() {
        let geom = test_geom();
        let pose = Pose::new(4.0, 3.0, std::f64::consts::FRAC_PI_2);
        let point = launch_point_field(&geom, &pose, 0.0);

        // Heading +90 deg rotates the horizontal offset onto +Y
        assert_relative_eq!(point.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(point.y, 3.0 + 0.22, epsilon = 1e-9);
        assert_relative_eq!(point.z, 0.33, epsilon = 1e-9);
    }
}
