//! Shooter parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the shooter: launch geometry plus solver tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct ShooterParams {
    pub geometry: LaunchGeometry,
    pub solver: SolverParams,
}

/// The fixed mechanical geometry of the launcher.
///
/// Constant for the life of the robot, measured off the CAD model.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchGeometry {
    /// Length of the arm from the pivot to the launch point
    pub arm_length_m: f64,

    /// Perpendicular offset from the arm line to the launch wheels
    pub arm_to_wheels_length_m: f64,

    /// Height of the pivot above the floor
    pub vertical_offset_m: f64,

    /// Horizontal offset of the pivot from the drivetrain centre
    pub horizontal_offset_m: f64,
}

/// Tuning parameters of the trajectory solver.
///
/// The initial guess and correction divisor are empirical: they were swept
/// together (0.1 deg / 0.01 steps) over batches of 300 random field poses,
/// minimising the average and worst-case iteration counts of the apex
/// solver. 21.7 deg with a divisor of 2.61 converged in 3.97 iterations on
/// average, 6 worst case. Divisors below 2 make the iteration oscillate.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverParams {
    /// Initial arm angle guess for the apex solver, degrees
    pub initial_guess_deg: f64,

    /// Divisor applied to the relative distance error when correcting the
    /// angle between iterations
    pub correction_divisor: f64,

    /// Convergence tolerance: horizontal distance error for the apex solver,
    /// angle (degrees) and speed (m/s) deltas for the direct solver
    pub convergence_tolerance: f64,

    /// Hard cap on solver iterations, the control loop must never be held up
    /// by an unconverged solve
    pub max_iterations: u32,

    /// Angle the solution is clamped up to when an iteration step goes to
    /// 0 deg or below
    pub min_angle_deg: f64,

    /// Angle the solution is clamped down to when an iteration step goes to
    /// 90 deg or above
    pub max_angle_deg: f64,

    /// Trim multiplier applied to the apex solver's launch speed
    pub speed_trim_factor: f64,

    /// Trim multiplier applied to the apex solver's launch angle
    pub angle_trim_factor: f64,

    /// Vertical velocity the note already has at launch (from driving or arm
    /// motion), used by the direct solver
    pub extra_vertical_velocity_ms: f64,
}
