//! Plan executor state machine
//!
//! A small interpreter over an [`ActionPlan`]. The host runs the hardware
//! body of each action; this state machine only decides which entry comes
//! next, evaluating each entry's skip condition against the sensor state
//! sampled this cycle. It replaces the command-combinator chains the plan
//! used to be built out of with one explicit, inspectable cursor.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;

// Internal
use super::{ActionPlan, PlannedAction, SkipCondition};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Executes an [`ActionPlan`] one action at a time.
#[derive(Debug, Default)]
pub struct PlanExec {
    plan: ActionPlan,
    state: PlanExecState,
}

/// Runtime sensor state, sampled once per control cycle by the host and
/// passed in by value.
#[derive(Debug, Copy, Clone, Default)]
pub struct SensorSnapshot {
    /// All the centre line notes the plan wanted are gone
    pub center_notes_gone: bool,

    /// A note is held in the intake or indexer
    pub note_held: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The executor's position within the plan.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlanExecState {
    /// A plan is loaded but not started
    Idle,

    /// The entry at `index` is the one currently being executed
    Running { index: usize },

    /// All entries have been executed or skipped
    Finished,
}

/// Errors that can occur when driving the plan executor.
#[derive(Debug, thiserror::Error)]
pub enum PlanExecError {
    #[error("Attempted to load a plan while one is still running")]
    PlanAlreadyRunning,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PlanExecState {
    fn default() -> Self {
        PlanExecState::Finished
    }
}

impl PlanExec {
    /// Create an executor with no plan. It starts Finished; load a plan to
    /// make it runnable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a plan for execution. Fails if a previous plan is still running,
    /// abort it first.
    pub fn load(&mut self, plan: ActionPlan) -> Result<(), PlanExecError> {
        if matches!(self.state, PlanExecState::Running { .. }) {
            return Err(PlanExecError::PlanAlreadyRunning);
        }

        info!("Loaded auto plan with {} actions", plan.len());

        self.plan = plan;
        self.state = PlanExecState::Idle;
        Ok(())
    }

    /// Abort the current plan. The executor goes straight to Finished; the
    /// host is responsible for stopping whatever action was in progress.
    pub fn abort(&mut self) {
        if matches!(self.state, PlanExecState::Running { .. }) {
            info!("Auto plan aborted");
        }
        self.state = PlanExecState::Finished;
    }

    pub fn state(&self) -> PlanExecState {
        self.state
    }

    /// Advance to the next action to execute.
    ///
    /// To be called when the previous action's body has completed (or timed
    /// out). Entries whose skip condition holds in `sensors` are passed over.
    /// Returns None once the plan is exhausted.
    pub fn advance(&mut self, sensors: &SensorSnapshot) -> Option<&PlannedAction> {
        let mut index = match self.state {
            PlanExecState::Idle => 0,
            PlanExecState::Running { index } => index + 1,
            PlanExecState::Finished => return None,
        };

        // Pass over any entries whose skip condition holds right now
        while let Some(entry) = self.plan.get(index) {
            match entry.skip_when {
                Some(condition) if should_skip(condition, sensors) => {
                    info!("Skipping {:?}: {:?}", entry.action, condition);
                    index += 1;
                }
                _ => break,
            }
        }

        if index < self.plan.len() {
            self.state = PlanExecState::Running { index };
            self.plan.get(index)
        } else {
            info!("Auto plan complete");
            self.state = PlanExecState::Finished;
            None
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Evaluate a skip condition against the current sensor state.
fn should_skip(condition: SkipCondition, sensors: &SensorSnapshot) -> bool {
    match condition {
        SkipCondition::CenterNotesGone => sensors.center_notes_gone,
        SkipCondition::NoNoteHeld => !sensors.note_held,
    }
}
