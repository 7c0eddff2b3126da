//! # Note player robot library.
//!
//! This library holds the planning and shooting calculations for the note
//! player robot. The hardware interface, command scheduling runtime, path
//! following and pose estimation are all external collaborators - everything
//! in here is synchronous, side-effect free (bar diagnostics) and is driven
//! by the host's periodic control loop.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomous planning module - builds the ordered pickup/score action plan
pub mod auto;

/// Field model - target coordinates, alliance handling and stage line-of-sight checks
pub mod field;

/// Localisation types - the robot pose produced by the external estimator
pub mod loc;

/// Shooter module - launch point geometry and the trajectory solver
pub mod shooter;
