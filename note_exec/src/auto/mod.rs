//! # Autonomous planning module
//!
//! This module converts the six operator-chosen parameters (see
//! [`AutoConfig`]) into the ordered sequence of pickup/score actions the
//! robot performs during the autonomous period. Planning is split into:
//!
//! - `note_order` - the visitation order over a pool of note pickup slots for
//!   a given lane and search direction
//! - `sequencer` - assembly of the full [`ActionPlan`] from the config and
//!   the computed orders
//! - `plan` - the abstract action types making up a plan, each carrying
//!   optional runtime guards for the executor
//! - `exec` - a small state machine which steps a plan one action per control
//!   cycle, evaluating the guards against current sensor readings
//!
//! The plan is built once at the start of the autonomous period and is
//! immutable afterwards. Runtime adaptation (a pickup finding no note, the
//! centre line emptied by the opponent) is handled by the executor skipping
//! guarded actions, never by re-planning.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod exec;
mod note_order;
mod params;
mod plan;
mod sequencer;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use exec::*;
pub use note_order::*;
pub use params::*;
pub use plan::*;
pub use sequencer::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of note pickup slots in the start area pool.
pub const START_POOL_SIZE: i32 = 3;

/// The number of note pickup slots in the centre line pool.
pub const CENTER_POOL_SIZE: i32 = 5;
