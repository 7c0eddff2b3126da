//! Abstract autonomous action plan
//!
//! A plan is an immutable ordered sequence of abstract actions. The hardware
//! bodies of the actions live in the external executor - each entry here only
//! names the action and carries the guards the executor should evaluate at
//! runtime (skip conditions, timeouts).

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A single abstract autonomous action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Collect the note in the given slot of the start area pool
    PickupFromStart(usize),

    /// Collect the note in the given slot of the centre line pool
    PickupFromCenter(usize),

    /// Score the held note in the amp
    ScoreAmp,

    /// Score the held note in the speaker
    ScoreSpeaker,

    /// Drive out of the start zone for the mobility bonus, starting from
    /// wherever the previous score left the robot
    DriveOut(ScoreTarget),
}

/// A scoring target on the field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScoreTarget {
    Amp,
    Speaker,
}

/// Runtime conditions under which the executor should skip an action.
///
/// These are evaluated by the executor against live sensor state, never
/// during planning.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SkipCondition {
    /// All the centre line notes the plan wanted are gone
    CenterNotesGone,

    /// The robot is not holding a note
    NoNoteHeld,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One entry of an [`ActionPlan`]: the action plus its executor guards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlannedAction {
    /// The action to perform
    pub action: Action,

    /// If the condition holds when the entry is reached the executor skips it
    pub skip_when: Option<SkipCondition>,

    /// Limit on how long the executor may spend on this action
    pub timeout_s: Option<f64>,
}

/// The immutable ordered sequence of actions for one autonomous run.
///
/// Built once per run by [`super::build_plan`] and consumed by the executor
/// one action at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionPlan(Vec<PlannedAction>);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PlannedAction {
    /// An unguarded action with no timeout.
    pub fn new(action: Action) -> Self {
        Self {
            action,
            skip_when: None,
            timeout_s: None,
        }
    }

    pub fn skip_when(mut self, condition: SkipCondition) -> Self {
        self.skip_when = Some(condition);
        self
    }

    pub fn with_timeout(mut self, timeout_s: Option<f64>) -> Self {
        self.timeout_s = timeout_s;
        self
    }
}

impl ActionPlan {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlannedAction> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannedAction> {
        self.0.iter()
    }

    /// Append an entry to the plan. Only the sequencer builds plans, once
    /// returned to the caller a plan is never modified.
    pub(crate) fn push(&mut self, entry: PlannedAction) {
        self.0.push(entry)
    }

    /// The bare action sequence, without guards. Mostly useful in tests.
    pub fn actions(&self) -> Vec<Action> {
        self.0.iter().map(|entry| entry.action).collect()
    }
}
