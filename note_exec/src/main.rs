//! Main autonomous planning executable entry point.
//!
//! An offline checkout of the planning stack: load the parameter files, build
//! the action plan for the configured strategy, walk it through the plan
//! executor with nominal sensors, and solve shooting solutions from a few
//! representative poses. Run this after editing any of the parameter files to
//! see exactly what the robot would do, without a robot.
//!
//! Requires the `NOTE_SW_ROOT` environment variable to point at the software
//! root (the directory containing `params/`).

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use note_lib::{
    auto::{build_plan, AutoConfig, PlanExec, SensorSnapshot},
    field::{self, Alliance, FieldParams},
    loc::Pose,
    shooter::{ShooterParams, Solver},
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};

// Internal
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Poses the shooting solver is checked out from, chosen to span the
/// close/far and clear/occluded corners of the blue wing.
const CHECKOUT_POSES: [(f64, f64, f64); 3] = [
    (1.5, 5.55, 0.0),
    (2.9, 4.1, 0.5),
    (8.0, 4.1, 0.3),
];

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("note_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Note Planner Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let auto_config: AutoConfig =
        util::params::load("auto.toml").wrap_err("Could not load auto params")?;
    let shooter_params: ShooterParams =
        util::params::load("shooter.toml").wrap_err("Could not load shooter params")?;
    let field_params: FieldParams =
        util::params::load("field.toml").wrap_err("Could not load field params")?;

    info!("Exec parameters loaded");

    // ---- PLAN CHECKOUT ----

    info!("Auto config: {:?}", auto_config);

    let plan = build_plan(&auto_config);

    if plan.is_empty() {
        warn!("Auto config produced an empty plan");
    }

    for (i, entry) in plan.iter().enumerate() {
        info!(
            "Plan [{}]: {:?} (skip_when: {:?}, timeout: {:?})",
            i, entry.action, entry.skip_when, entry.timeout_s
        );
    }

    // Walk the plan through the executor with nominal sensors, the sequence
    // logged here is what a clean match would run
    let mut exec = PlanExec::new();
    exec.load(plan).wrap_err("Could not load the plan")?;

    let nominal = SensorSnapshot {
        center_notes_gone: false,
        note_held: true,
    };

    while let Some(entry) = exec.advance(&nominal) {
        info!("Execute: {:?}", entry.action);
    }

    // ---- SOLVER CHECKOUT ----

    let mut solver = Solver::new(shooter_params);
    let target_m = field_params.speaker_coords_m(Alliance::Blue);

    for &(x, y, heading) in CHECKOUT_POSES.iter() {
        let pose = Pose::new(x, y, heading);

        let clear = field::has_line_of_sight(
            &field_params,
            Alliance::Blue,
            &pose.position_m,
            &target_m.xy(),
        );
        info!(
            "Pose ({:.2}, {:.2}): line of sight to the speaker: {}",
            x, y, clear
        );

        match solver.solve_apex(&pose, &target_m) {
            Ok(solution) => info!(
                "  apex:   {:.1} deg at {:.2} m/s (converged: {})",
                solution.angle_deg, solution.speed_ms, solution.converged
            ),
            Err(e) => warn!("  apex:   no solution: {}", e),
        }

        match solver.solve_direct(&pose, &target_m) {
            Ok(solution) => info!(
                "  direct: {:.1} deg at {:.2} m/s (converged: {})",
                solution.angle_deg, solution.speed_ms, solution.converged
            ),
            Err(e) => warn!("  direct: no solution: {}", e),
        }
    }

    info!("Checkout complete");

    Ok(())
}
