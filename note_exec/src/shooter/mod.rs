//! # Shooter module
//!
//! Everything needed to turn "the robot is here, the target is there" into
//! arm angle and launch speed demands:
//!
//! - `geometry` - closed-form position of the launch point given the arm
//!   angle and the fixed mechanical offsets
//! - `solver` - the iterative trajectory solver producing a
//!   [`ShootingSolution`]
//! - `params` - the mechanical constants and solver tuning, loaded from
//!   `shooter.toml`
//!
//! Motor control itself is external: the host feeds the solution into the
//! arm and launcher wheel setpoints.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod geometry;
mod params;
mod solver;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use solver::*;
