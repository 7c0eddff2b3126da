//! Autonomous run configuration

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use super::{AutoLane, SearchDirection};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The operator-chosen configuration for one autonomous run.
///
/// Chosen on the driver station before the match and loaded once at the start
/// of the autonomous period.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoConfig {
    /// Total number of notes to score, including the preloaded one
    pub total_actions: i32,

    /// How many of the scoring cycles should go to the amp rather than the
    /// speaker
    pub amp_scores: i32,

    /// The travel lane to use
    pub lane: AutoLane,

    /// Number of notes to collect from the start area pool
    pub start_pickups: i32,

    /// Search direction when traversing under the stage
    pub search_direction: SearchDirection,

    /// If true empty the centre line pool before the start area pool
    pub center_first: bool,

    /// Limit handed to the executor on how long a single pickup may take
    pub pickup_timeout_s: Option<f64>,
}
