//! Note pickup ordering
//!
//! Computes the order in which the slots of a note pool should be visited,
//! given the travel lane and (for the under-stage lane) a search direction.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The general area of the field the robot drives in during autonomous.
///
/// Each lane induces its own visitation order over a note pool: slot 1 is the
/// slot nearest the amp-side field boundary, the highest numbered slot is
/// nearest the source-side boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum AutoLane {
    AmpSide,
    SourceSide,
    UnderStage,
}

/// The direction to search in when traversing the under-stage lane.
///
/// Only meaningful for [`AutoLane::UnderStage`]; the other lanes have a fixed
/// traversal direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum SearchDirection {
    /// Advance towards higher slot numbers (towards the source)
    Forward,

    /// Advance towards lower slot numbers (towards the amp)
    Backward,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SearchDirection {
    /// The per-step slot increment for this direction.
    pub fn step(&self) -> i32 {
        match self {
            SearchDirection::Forward => 1,
            SearchDirection::Backward => -1,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the slot numbers of a note pool in the order they should be visited.
///
/// Slot numbers are 1-based. Returns an empty order if `count` is less than 1
/// or greater than `pool_size`.
///
/// - [`AutoLane::AmpSide`]: ascending from slot 1.
/// - [`AutoLane::SourceSide`]: descending from slot `pool_size`.
/// - [`AutoLane::UnderStage`]: starts at the centre slot and advances by the
///   search direction each step, wrapping around the pool when it runs off
///   either end. Grabbing all 5 centre slots backwards therefore gives
///   3, 2, 1, 5, 4.
pub fn order_of_notes(
    count: i32,
    lane: AutoLane,
    direction: SearchDirection,
    pool_size: i32,
) -> Vec<usize> {
    if count < 1 || count > pool_size {
        return Vec::new();
    }

    let mut order = Vec::with_capacity(count as usize);

    match lane {
        AutoLane::AmpSide => {
            for i in 1..=count {
                order.push(i as usize);
            }
        }
        AutoLane::SourceSide => {
            for i in 0..count {
                order.push((pool_size - i) as usize);
            }
        }
        AutoLane::UnderStage => {
            // The centre slot, rounding up for even pool sizes
            let mut slot = (pool_size + 1) / 2;

            for _ in 0..count {
                order.push(slot as usize);

                slot += direction.step();

                // Wrap back into the 1..=pool_size range
                if slot < 1 {
                    slot += pool_size;
                } else if slot > pool_size {
                    slot -= pool_size;
                }
            }
        }
    }

    order
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_amp_side_ascending() {
        for count in 1..=5 {
            let order = order_of_notes(count, AutoLane::AmpSide, SearchDirection::Forward, 5);
            let expected: Vec<usize> = (1..=count as usize).collect();
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn test_source_side_descending() {
        for count in 1..=5 {
            let order = order_of_notes(count, AutoLane::SourceSide, SearchDirection::Forward, 5);
            let expected: Vec<usize> = (0..count as usize).map(|i| 5 - i).collect();
            assert_eq!(order, expected);
        }

        assert_eq!(
            order_of_notes(2, AutoLane::SourceSide, SearchDirection::Backward, 3),
            vec![3, 2]
        );
    }

    #[test]
    fn test_under_stage_forward_wraps() {
        assert_eq!(
            order_of_notes(5, AutoLane::UnderStage, SearchDirection::Forward, 5),
            vec![3, 4, 5, 1, 2]
        );
    }

    #[test]
    fn test_under_stage_backward_wraps() {
        assert_eq!(
            order_of_notes(5, AutoLane::UnderStage, SearchDirection::Backward, 5),
            vec![3, 2, 1, 5, 4]
        );
    }

    #[test]
    fn test_under_stage_start_pool() {
        // Pool of 3 starts at slot 2
        assert_eq!(
            order_of_notes(3, AutoLane::UnderStage, SearchDirection::Forward, 3),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_out_of_bounds_count_is_empty() {
        assert!(order_of_notes(0, AutoLane::AmpSide, SearchDirection::Forward, 5).is_empty());
        assert!(order_of_notes(-2, AutoLane::AmpSide, SearchDirection::Forward, 5).is_empty());
        assert!(order_of_notes(6, AutoLane::AmpSide, SearchDirection::Forward, 5).is_empty());
    }

    #[test]
    fn test_pure_and_repeatable() {
        let a = order_of_notes(4, AutoLane::UnderStage, SearchDirection::Backward, 5);
        let b = order_of_notes(4, AutoLane::UnderStage, SearchDirection::Backward, 5);
        assert_eq!(a, b);
    }
}
