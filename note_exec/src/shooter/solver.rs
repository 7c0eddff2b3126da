//! # Trajectory solver
//!
//! Produces the arm angle and launch speed needed to put a note in a target,
//! accounting for the launch point moving with the arm angle (see
//! [`geometry`]). Two solving modes are provided, both deterministic
//! fixed-point iterations with a hard iteration cap so a solve can never
//! hold up the control loop:
//!
//! - [`Solver::solve_apex`] places the apex of the note's flight at the
//!   target, iterating on the arm angle until the horizontal distance error
//!   is inside tolerance. Used while moving, seeded with the previous
//!   converged angle.
//! - [`Solver::solve_direct`] decomposes the required velocity into vertical
//!   and horizontal components from the target height delta and flight time,
//!   re-solving with the updated launch point until angle and speed settle.
//!
//! Solutions are always finite, with the angle strictly inside (0, 90)
//! degrees. If the cap is reached the last (clamped) estimate is returned
//! with `converged = false` - the caller decides whether to shoot on a
//! degraded solution, the actuators never see a NaN.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use nalgebra::Vector3;
use thiserror::Error;

// Internal
use super::{geometry, ShooterParams};
use crate::loc::Pose;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Acceleration due to gravity, m/s^2.
const GRAVITY_MS2: f64 = 9.8;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A solved set of shooting parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingSolution {
    /// Arm angle demand, degrees, strictly inside (0, 90)
    pub angle_deg: f64,

    /// Launch wheel surface speed demand
    pub speed_ms: f64,

    /// False if the iteration cap was reached before the tolerance was met;
    /// the solution is then the last clamped estimate
    pub converged: bool,
}

/// The trajectory solver.
///
/// Holds the tuning parameters plus the previous converged apex angle, which
/// seeds the next solve. The seed only affects how fast the iteration
/// converges, never what it converges to - a cold start works from the
/// configured initial guess.
pub struct Solver {
    params: ShooterParams,

    /// Apex angle of the last converged solve, degrees
    next_guess_deg: Option<f64>,
}

/// One evaluation of the apex iteration.
struct ApexStep {
    /// Error between the launch point's horizontal distance to the target
    /// and where the apex would land
    distance_error_m: f64,

    /// Launch speed putting the apex at the target height
    launch_speed_ms: f64,

    /// Horizontal distance from the launch point to the target
    launch_horizontal_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur during a solve.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The target is at or below the launch height, no lobbed trajectory
    /// reaches it
    #[error(
        "Target at {target_height_m:.2} m is unreachable from launch height {launch_height_m:.2} m"
    )]
    UnreachableTarget {
        target_height_m: f64,
        launch_height_m: f64,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Solver {
    pub fn new(params: ShooterParams) -> Self {
        Self {
            params,
            next_guess_deg: None,
        }
    }

    /// Forget the carried-over angle seed, e.g. when aiming stops.
    pub fn reset_guess(&mut self) {
        self.next_guess_deg = None;
    }

    /// Solve for the apex of the trajectory to be at the target, seeding the
    /// iteration with the previous converged angle if there is one.
    pub fn solve_apex(
        &mut self,
        pose: &Pose,
        target_m: &Vector3<f64>,
    ) -> Result<ShootingSolution, SolverError> {
        let guess_deg = self
            .next_guess_deg
            .unwrap_or(self.params.solver.initial_guess_deg);

        let solution = self.solve_apex_from(guess_deg, pose, target_m)?;

        // A diverged solve is not a useful seed
        self.next_guess_deg = match solution.converged {
            true => Some(solution.angle_deg),
            false => None,
        };

        Ok(solution)
    }

    /// Apex solve from an explicit initial guess. Pure: identical inputs
    /// give identical output.
    ///
    /// Iterates the arm angle by the empirically tuned correction
    /// `(distance_error / launch_horizontal) / correction_divisor` until the
    /// horizontal distance error is inside tolerance or the iteration cap is
    /// hit. Angles stepping outside (0, 90) degrees are clamped back to the
    /// configured safe bounds.
    pub fn solve_apex_from(
        &self,
        initial_guess_deg: f64,
        pose: &Pose,
        target_m: &Vector3<f64>,
    ) -> Result<ShootingSolution, SolverError> {
        let p = &self.params.solver;

        let robot_distance_m = pose.distance_to_m(&target_m.xy());

        let mut angle_rad =
            clamp(&initial_guess_deg, &p.min_angle_deg, &p.max_angle_deg).to_radians();

        let mut step = self.apex_step(robot_distance_m, angle_rad, target_m.z)?;
        let mut loops = 1;

        while step.distance_error_m.abs() > p.convergence_tolerance && loops < p.max_iterations {
            angle_rad -= (step.distance_error_m / step.launch_horizontal_m) / p.correction_divisor;
            angle_rad = self.clamp_angle_rad(angle_rad);

            step = self.apex_step(robot_distance_m, angle_rad, target_m.z)?;
            loops += 1;
        }

        let converged = step.distance_error_m.abs() <= p.convergence_tolerance;
        if !converged {
            warn!(
                "Apex solver hit the iteration cap ({}), distance error still {:.3} m",
                p.max_iterations, step.distance_error_m
            );
        }

        Ok(ShootingSolution {
            angle_deg: angle_rad.to_degrees() * p.angle_trim_factor,
            speed_ms: step.launch_speed_ms * p.speed_trim_factor,
            converged,
        })
    }

    /// Solve by decomposing the required launch velocity into vertical and
    /// horizontal components. Pure: identical inputs give identical output.
    ///
    /// The vertical component comes from the target height delta
    /// (`vy = sqrt(extra_vy^2 + 2 g dh)`), the flight time from the vertical
    /// component, and the horizontal component from distance over flight
    /// time. Since the launch point depends on the resulting angle the
    /// evaluation is repeated with the updated geometry until angle and
    /// speed settle.
    pub fn solve_direct(
        &self,
        pose: &Pose,
        target_m: &Vector3<f64>,
    ) -> Result<ShootingSolution, SolverError> {
        let p = &self.params.solver;

        let distance_m = pose.distance_to_m(&target_m.xy());

        // First evaluation with the arm flat
        let (mut angle_rad, mut speed_ms) = self.direct_step(pose, target_m, distance_m, 0.0)?;

        let mut converged = false;
        let mut tries = 1;

        while tries < p.max_iterations {
            let (next_angle_rad, next_speed_ms) =
                self.direct_step(pose, target_m, distance_m, angle_rad)?;

            let settled = (next_angle_rad - angle_rad).to_degrees().abs()
                < p.convergence_tolerance
                && (next_speed_ms - speed_ms).abs() < p.convergence_tolerance;

            angle_rad = next_angle_rad;
            speed_ms = next_speed_ms;
            tries += 1;

            if settled {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!("Direct solver hit the iteration cap ({})", p.max_iterations);
        }

        let angle_rad = self.clamp_angle_rad(angle_rad);

        Ok(ShootingSolution {
            angle_deg: angle_rad.to_degrees(),
            speed_ms,
            converged,
        })
    }

    /// One evaluation of the apex iteration at a fixed arm angle.
    fn apex_step(
        &self,
        robot_distance_m: f64,
        angle_rad: f64,
        target_height_m: f64,
    ) -> Result<ApexStep, SolverError> {
        let launch =
            geometry::launch_point_target_relative(&self.params.geometry, robot_distance_m, angle_rad);

        let height_delta_m = target_height_m - launch.y;
        if height_delta_m <= 0.0 {
            return Err(SolverError::UnreachableTarget {
                target_height_m,
                launch_height_m: launch.y,
            });
        }

        let sin = angle_rad.sin();

        // Speed putting the apex at the target height, then where that apex
        // lands horizontally
        let launch_speed_ms = (height_delta_m * 2.0 * GRAVITY_MS2 / (sin * sin)).sqrt();
        let time_to_apex_s = launch_speed_ms * sin / GRAVITY_MS2;
        let launch_distance_m = launch_speed_ms * angle_rad.cos() * time_to_apex_s;

        Ok(ApexStep {
            distance_error_m: launch.x - launch_distance_m,
            launch_speed_ms,
            launch_horizontal_m: launch.x,
        })
    }

    /// One evaluation of the direct iteration at a fixed arm angle.
    fn direct_step(
        &self,
        pose: &Pose,
        target_m: &Vector3<f64>,
        distance_m: f64,
        angle_rad: f64,
    ) -> Result<(f64, f64), SolverError> {
        let p = &self.params.solver;

        let launch = geometry::launch_point_field(&self.params.geometry, pose, angle_rad);

        let extra_vy_ms = p.extra_vertical_velocity_ms;

        let radicand =
            extra_vy_ms * extra_vy_ms + (target_m.z - launch.z) * 2.0 * GRAVITY_MS2;
        if radicand < 0.0 {
            return Err(SolverError::UnreachableTarget {
                target_height_m: target_m.z,
                launch_height_m: launch.z,
            });
        }

        let vertical_velocity_ms = radicand.sqrt();

        let air_time_s = (vertical_velocity_ms - extra_vy_ms) / GRAVITY_MS2;
        if air_time_s <= 0.0 {
            // Target level with the launch point, the note would never climb
            return Err(SolverError::UnreachableTarget {
                target_height_m: target_m.z,
                launch_height_m: launch.z,
            });
        }

        let horizontal_velocity_ms = distance_m / air_time_s;

        Ok((
            vertical_velocity_ms.atan2(horizontal_velocity_ms),
            vertical_velocity_ms.hypot(horizontal_velocity_ms),
        ))
    }

    /// Clamp an iterated angle back inside the mechanical range.
    ///
    /// Safety clamp against divergence only, convergence is judged on the
    /// error terms. At 90 deg and above the note has no forward speed, at
    /// 0 deg and below no upward speed.
    fn clamp_angle_rad(&self, angle_rad: f64) -> f64 {
        let p = &self.params.solver;
        let angle_deg = angle_rad.to_degrees();

        if angle_deg >= 90.0 {
            warn!(
                "Solver angle out of bounds ({:.1} deg), clamping to {:.1} deg",
                angle_deg, p.max_angle_deg
            );
            p.max_angle_deg.to_radians()
        } else if angle_deg <= 0.0 {
            warn!(
                "Solver angle out of bounds ({:.1} deg), clamping to {:.1} deg",
                angle_deg, p.min_angle_deg
            );
            p.min_angle_deg.to_radians()
        } else {
            angle_rad
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shooter::{LaunchGeometry, SolverParams};
    use approx::assert_relative_eq;

    fn test_params() -> ShooterParams {
        ShooterParams {
            geometry: LaunchGeometry {
                arm_length_m: 0.22,
                arm_to_wheels_length_m: 0.05,
                vertical_offset_m: 0.28,
                horizontal_offset_m: 0.0,
            },
            solver: SolverParams {
                initial_guess_deg: 21.7,
                correction_divisor: 2.61,
                convergence_tolerance: 0.01,
                max_iterations: 10,
                min_angle_deg: 5.0,
                max_angle_deg: 85.0,
                speed_trim_factor: 1.0,
                angle_trim_factor: 1.0,
                extra_vertical_velocity_ms: 0.0,
            },
        }
    }

    fn speaker() -> Vector3<f64> {
        Vector3::new(0.0, 5.0, 2.045)
    }

    #[test]
    fn test_apex_converges_within_cap() {
        let solver = Solver::new(test_params());
        let pose = Pose::new(2.5, 5.0, 0.0);

        let solution = solver.solve_apex_from(21.7, &pose, &speaker()).unwrap();

        assert!(solution.converged);
        assert!(solution.angle_deg > 5.0 && solution.angle_deg < 85.0);
        assert!(solution.speed_ms.is_finite() && solution.speed_ms > 0.0);
    }

    #[test]
    fn test_apex_is_pure() {
        let solver = Solver::new(test_params());
        let pose = Pose::new(3.1, 4.2, 0.4);

        let a = solver.solve_apex_from(21.7, &pose, &speaker()).unwrap();
        let b = solver.solve_apex_from(21.7, &pose, &speaker()).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_apex_seeded_solve_agrees_with_cold_start() {
        let mut solver = Solver::new(test_params());
        let pose = Pose::new(2.5, 5.0, 0.0);

        let cold = solver.solve_apex(&pose, &speaker()).unwrap();
        let seeded = solver.solve_apex(&pose, &speaker()).unwrap();

        assert!(cold.converged);
        assert!(seeded.converged);
        // The seed speeds up convergence, it must not change the answer
        // beyond the convergence tolerance
        assert_relative_eq!(cold.angle_deg, seeded.angle_deg, epsilon = 0.5);
        assert_relative_eq!(cold.speed_ms, seeded.speed_ms, epsilon = 0.5);
    }

    #[test]
    fn test_apex_reports_divergence_at_iteration_cap() {
        let mut params = test_params();
        params.solver.max_iterations = 1;
        let solver = Solver::new(params);
        let pose = Pose::new(2.5, 5.0, 0.0);

        // One evaluation is nowhere near enough from a cold start; the solver
        // must hand back its last estimate flagged unconverged, never panic
        // or spin
        let solution = solver.solve_apex_from(21.7, &pose, &speaker()).unwrap();

        assert!(!solution.converged);
        assert!(solution.angle_deg >= 5.0 && solution.angle_deg <= 85.0);
        assert!(solution.speed_ms.is_finite() && solution.speed_ms > 0.0);
    }

    #[test]
    fn test_apex_clamps_overshooting_step_to_max_angle() {
        let mut params = test_params();
        // A tiny divisor makes the first correction step enormous, driving
        // the angle past 90 deg
        params.solver.correction_divisor = 0.1;
        params.solver.max_iterations = 2;
        let solver = Solver::new(params);
        let pose = Pose::new(2.5, 5.0, 0.0);

        let solution = solver.solve_apex_from(21.7, &pose, &speaker()).unwrap();

        assert_relative_eq!(solution.angle_deg, 85.0, epsilon = 1e-9);
        assert!(!solution.converged);
        assert!(solution.speed_ms.is_finite());
    }

    #[test]
    fn test_apex_clamps_undershooting_step_to_min_angle() {
        let mut params = test_params();
        params.solver.correction_divisor = 0.1;
        params.solver.max_iterations = 2;
        let solver = Solver::new(params);
        let pose = Pose::new(2.5, 5.0, 0.0);

        // From a steep guess the distance error is positive, so the huge
        // step drives the angle below 0 deg
        let solution = solver.solve_apex_from(85.0, &pose, &speaker()).unwrap();

        assert_relative_eq!(solution.angle_deg, 5.0, epsilon = 1e-9);
        assert!(!solution.converged);
        assert!(solution.speed_ms.is_finite());
    }

    #[test]
    fn test_reset_guess_restores_cold_start() {
        let mut solver = Solver::new(test_params());
        let pose = Pose::new(2.5, 5.0, 0.0);

        let seeded = solver.solve_apex(&pose, &speaker()).unwrap();
        assert!(seeded.converged);

        // Clearing the seed must fall back to the configured initial guess
        // and still converge to the same answer
        solver.reset_guess();
        let cold = solver.solve_apex(&pose, &speaker()).unwrap();

        assert!(cold.converged);
        assert_relative_eq!(cold.angle_deg, seeded.angle_deg, epsilon = 0.5);
        assert_relative_eq!(cold.speed_ms, seeded.speed_ms, epsilon = 0.5);
    }

    #[test]
    fn test_apex_rejects_target_below_launch() {
        let solver = Solver::new(test_params());
        let pose = Pose::new(2.5, 5.0, 0.0);
        let low_target = Vector3::new(0.0, 5.0, 0.1);

        assert!(matches!(
            solver.solve_apex_from(21.7, &pose, &low_target),
            Err(SolverError::UnreachableTarget { .. })
        ));
    }

    #[test]
    fn test_direct_converges() {
        let solver = Solver::new(test_params());
        let pose = Pose::new(2.0, 5.0, std::f64::consts::PI);

        let solution = solver.solve_direct(&pose, &speaker()).unwrap();

        assert!(solution.converged);
        assert!(solution.angle_deg > 0.0 && solution.angle_deg < 90.0);
        assert!(solution.speed_ms.is_finite() && solution.speed_ms > 0.0);
    }

    #[test]
    fn test_direct_steepens_under_target() {
        let solver = Solver::new(test_params());

        // Almost directly beneath the target: the angle approaches vertical
        // without any divide-by-zero
        let pose = Pose::new(0.005, 5.0, 0.0);
        let solution = solver.solve_direct(&pose, &speaker()).unwrap();

        assert!(solution.angle_deg > 85.0 && solution.angle_deg < 90.0);
        assert!(solution.speed_ms.is_finite());
    }

    #[test]
    fn test_direct_reports_divergence_at_iteration_cap() {
        let mut params = test_params();
        params.solver.max_iterations = 1;
        let solver = Solver::new(params);
        let pose = Pose::new(2.0, 5.0, 0.0);

        // The cap stops the iteration after the flat-arm evaluation, before
        // angle and speed have settled
        let solution = solver.solve_direct(&pose, &speaker()).unwrap();

        assert!(!solution.converged);
        assert!(solution.angle_deg > 0.0 && solution.angle_deg < 90.0);
        assert!(solution.speed_ms.is_finite() && solution.speed_ms > 0.0);
    }

    #[test]
    fn test_direct_is_pure() {
        let solver = Solver::new(test_params());
        let pose = Pose::new(1.7, 6.3, -0.8);

        let a = solver.solve_direct(&pose, &speaker()).unwrap();
        let b = solver.solve_direct(&pose, &speaker()).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_direct_rejects_level_target() {
        let solver = Solver::new(test_params());
        let pose = Pose::new(2.0, 5.0, 0.0);
        let level_target = Vector3::new(0.0, 5.0, 0.33);

        assert!(matches!(
            solver.solve_direct(&pose, &level_target),
            Err(SolverError::UnreachableTarget { .. })
        ));
    }
}
