//! Autonomous action sequencer
//!
//! Builds the full [`ActionPlan`] for an autonomous run from the operator
//! configuration. Building is pure and deterministic: the same config always
//! produces the same plan, which keeps runs replayable in simulation.
//!
//! The plan always opens by scoring the preloaded note in the speaker. After
//! that each cycle is one pickup followed by one score, with the pickup
//! source chosen by the centre/start branch rule and amp scores taking
//! strict priority for the first `amp_scores` cycles.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use super::{
    order_of_notes, Action, ActionPlan, AutoConfig, PlannedAction, ScoreTarget, SkipCondition,
    CENTER_POOL_SIZE, START_POOL_SIZE,
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the action plan for one autonomous run.
///
/// Out-of-range inputs never panic: a non-positive `total_actions` yields an
/// empty plan, `start_pickups` is clamped so the preloaded note is always
/// scored before any pickup, and slot accesses past the end of a pool order
/// are clamped to its last entry (with a warning, since it means the config
/// asked for more pickups from a pool than were planned).
///
/// Known planning gap, kept deliberately: for `total_actions > 1` the plan
/// never schedules a final drive out to the centre line, and some
/// combinations of `center_first`, `start_pickups` and `amp_scores` can
/// request more start pool pickups than were ordered. The branch rule is the
/// one the drive team practised with, so it is preserved as-is and the
/// clamps above keep it safe.
pub fn build_plan(config: &AutoConfig) -> ActionPlan {
    let mut plan = ActionPlan::default();

    if config.total_actions <= 0 {
        warn!(
            "Asked to plan {} autonomous actions, returning an empty plan",
            config.total_actions
        );
        return plan;
    }

    // Make sure we don't try to take more notes from the start than we want
    // to score
    let start_pickups = if config.start_pickups >= config.total_actions {
        warn!(
            "start_pickups ({}) must be less than total_actions ({}), clamping to {}",
            config.start_pickups,
            config.total_actions,
            config.total_actions - 1
        );
        config.total_actions - 1
    } else {
        config.start_pickups
    };

    // The number of notes to take from the centre line
    let center_pickups = config.total_actions - (start_pickups + 1);

    // The orders to visit each pool's slots in
    let start_order = order_of_notes(
        start_pickups,
        config.lane,
        config.search_direction,
        START_POOL_SIZE,
    );
    let center_order = order_of_notes(
        center_pickups,
        config.lane,
        config.search_direction,
        CENTER_POOL_SIZE,
    );

    // Score the preloaded note in the speaker first thing
    plan.push(PlannedAction::new(Action::ScoreSpeaker));
    let mut last_scored_in = ScoreTarget::Speaker;

    if config.total_actions == 1 {
        // Mobility-only run: just leave the start zone
        plan.push(PlannedAction::new(Action::DriveOut(last_scored_in)));
        return plan;
    }

    // How many start pool pickups have been scheduled so far
    let mut start_attempts = 0usize;

    for i in 0..(config.total_actions - 1) {
        // Take from the centre line if we are taking from the centre first
        // and haven't scheduled all the centre notes yet, or if we are taking
        // from the start first and have already scheduled all the start notes
        let from_center = (config.center_first && i < center_pickups)
            || (!config.center_first && i >= start_pickups);

        if from_center {
            if let Some(slot) = clamped_slot(&center_order, i as usize, "centre") {
                plan.push(
                    PlannedAction::new(Action::PickupFromCenter(slot))
                        .skip_when(SkipCondition::CenterNotesGone)
                        .with_timeout(config.pickup_timeout_s),
                );
            }
        } else {
            if let Some(slot) = clamped_slot(&start_order, start_attempts, "start") {
                plan.push(
                    PlannedAction::new(Action::PickupFromStart(slot))
                        .with_timeout(config.pickup_timeout_s),
                );
            }
            start_attempts += 1;
        }

        // Amp scores take strict priority for the first `amp_scores` cycles,
        // whatever the pickup source was
        if i < config.amp_scores {
            last_scored_in = ScoreTarget::Amp;
            plan.push(PlannedAction::new(Action::ScoreAmp).skip_when(SkipCondition::NoNoteHeld));
        } else {
            last_scored_in = ScoreTarget::Speaker;
            plan.push(
                PlannedAction::new(Action::ScoreSpeaker).skip_when(SkipCondition::NoNoteHeld),
            );
        }
    }

    debug!(
        "Built auto plan with {} actions, last score target {:?}",
        plan.len(),
        last_scored_in
    );

    plan
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Index into a pool order, clamping to the last entry rather than going out
/// of range.
///
/// Returns None (and warns) if the order is empty, which means the branch
/// rule requested a pickup from a pool no pickups were planned from.
fn clamped_slot(order: &[usize], index: usize, pool: &str) -> Option<usize> {
    match order.get(index) {
        Some(&slot) => Some(slot),
        None => match order.last() {
            Some(&slot) => {
                warn!(
                    "Pickup {} requested from the {} pool but only {} were ordered, \
                     re-using slot {}",
                    index + 1,
                    pool,
                    order.len(),
                    slot
                );
                Some(slot)
            }
            None => {
                warn!(
                    "Pickup requested from the {} pool but none were ordered, skipping",
                    pool
                );
                None
            }
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::{AutoLane, SearchDirection};

    fn config(
        total_actions: i32,
        amp_scores: i32,
        start_pickups: i32,
        center_first: bool,
    ) -> AutoConfig {
        AutoConfig {
            total_actions,
            amp_scores,
            lane: AutoLane::AmpSide,
            start_pickups,
            search_direction: SearchDirection::Forward,
            center_first,
            pickup_timeout_s: Some(2.0),
        }
    }

    #[test]
    fn test_empty_plan_for_no_actions() {
        assert!(build_plan(&config(0, 0, 0, false)).is_empty());
        assert!(build_plan(&config(-3, 0, 0, false)).is_empty());
    }

    #[test]
    fn test_mobility_only_run() {
        let plan = build_plan(&config(1, 0, 0, false));
        assert_eq!(
            plan.actions(),
            vec![Action::ScoreSpeaker, Action::DriveOut(ScoreTarget::Speaker)]
        );
    }

    #[test]
    fn test_three_note_amp_priority() {
        // Preload to speaker, then one centre pickup scored in the amp, then
        // one start pickup scored in the speaker
        let plan = build_plan(&config(3, 1, 1, true));

        assert_eq!(plan.len(), 5);
        assert_eq!(
            plan.actions(),
            vec![
                Action::ScoreSpeaker,
                Action::PickupFromCenter(1),
                Action::ScoreAmp,
                Action::PickupFromStart(1),
                Action::ScoreSpeaker,
            ]
        );
    }

    #[test]
    fn test_start_first_ordering() {
        // Start pool first: two start pickups then two centre pickups. The
        // branch rule indexes the centre order by cycle, which over-runs it
        // here (the documented planning gap) - the clamp re-uses the last
        // ordered centre slot rather than panicking
        let plan = build_plan(&config(5, 0, 2, false));

        assert_eq!(
            plan.actions(),
            vec![
                Action::ScoreSpeaker,
                Action::PickupFromStart(1),
                Action::ScoreSpeaker,
                Action::PickupFromStart(2),
                Action::ScoreSpeaker,
                Action::PickupFromCenter(2),
                Action::ScoreSpeaker,
                Action::PickupFromCenter(2),
                Action::ScoreSpeaker,
            ]
        );
    }

    #[test]
    fn test_start_pickups_clamped() {
        // start_pickups >= total_actions clamps so the preloaded note is
        // still scored first
        let plan = build_plan(&config(2, 0, 5, false));

        assert_eq!(
            plan.actions(),
            vec![
                Action::ScoreSpeaker,
                Action::PickupFromStart(1),
                Action::ScoreSpeaker,
            ]
        );
    }

    #[test]
    fn test_center_guards_attached() {
        let plan = build_plan(&config(2, 0, 0, true));

        let pickup = plan.get(1).unwrap();
        assert_eq!(pickup.action, Action::PickupFromCenter(1));
        assert_eq!(pickup.skip_when, Some(SkipCondition::CenterNotesGone));
        assert_eq!(pickup.timeout_s, Some(2.0));

        let score = plan.get(2).unwrap();
        assert_eq!(score.action, Action::ScoreSpeaker);
        assert_eq!(score.skip_when, Some(SkipCondition::NoNoteHeld));
    }

    #[test]
    fn test_deterministic() {
        let cfg = config(4, 2, 1, true);
        assert_eq!(build_plan(&cfg), build_plan(&cfg));
    }

    #[test]
    fn test_overcommitted_start_pool_does_not_panic() {
        // center_first with more cycles than centre pickups forces the start
        // branch to over-run its order; the clamp keeps this in range
        let plan = build_plan(&config(6, 0, 4, true));
        assert!(plan.len() <= 11);
        assert!(!plan.is_empty());
    }
}
