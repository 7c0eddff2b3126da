//! # Field model
//!
//! Fixed field geometry for the current game: the speaker target coordinates
//! for each alliance and the stage leg segments used for line-of-sight
//! checks. All of it is loaded from `field.toml` at startup and never mutated.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Vector2, Vector3};
use serde::Deserialize;

// Internal
use util::maths::segments_intersect;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters describing the field geometry.
///
/// All coordinates are metres in the field frame (origin at the blue alliance
/// corner).
#[derive(Debug, Clone, Deserialize)]
pub struct FieldParams {
    /// Coordinates of the blue speaker opening (x, y, height above floor)
    pub blue_speaker_m: Vector3<f64>,

    /// Coordinates of the red speaker opening (x, y, height above floor)
    pub red_speaker_m: Vector3<f64>,

    /// The stage apex point nearest the speaker, used to decide which side of
    /// the line of fire to offset the occlusion check to
    pub stage_speaker_point_m: Vector2<f64>,

    /// The three leg segments of the blue stage
    pub blue_stage_legs_m: [StageLeg; 3],

    /// The three leg segments of the red stage
    pub red_stage_legs_m: [StageLeg; 3],

    /// Diameter of a game piece note
    pub note_diameter_m: f64,
}

/// One leg of the stage structure, as a ground-plane segment.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct StageLeg {
    pub start_m: Vector2<f64>,
    pub end_m: Vector2<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The alliance the robot is playing on, as reported by the field management
/// system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum Alliance {
    Blue,
    Red,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FieldParams {
    /// Get the speaker target coordinates for the given alliance.
    pub fn speaker_coords_m(&self, alliance: Alliance) -> Vector3<f64> {
        match alliance {
            Alliance::Blue => self.blue_speaker_m,
            Alliance::Red => self.red_speaker_m,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Checks whether the stage is between the robot and the target.
///
/// The flight path is modelled as the robot->target segment, offset
/// perpendicular to the line of fire by half a note diameter (on the side of
/// the stage, chosen from the robot's Y position relative to the stage apex).
/// Returns true if that path does not cross any of the alliance's three stage
/// legs.
pub fn has_line_of_sight(
    params: &FieldParams,
    alliance: Alliance,
    robot_m: &Vector2<f64>,
    target_m: &Vector2<f64>,
) -> bool {
    let delta = robot_m - target_m;
    let angle_to_target_rad = delta.y.atan2(delta.x);

    // Offset towards the stage side of the line of fire
    let offset_angle_rad = if robot_m.y > params.stage_speaker_point_m.y {
        angle_to_target_rad - std::f64::consts::FRAC_PI_2
    } else {
        angle_to_target_rad + std::f64::consts::FRAC_PI_2
    };

    let offset_m = Vector2::new(
        offset_angle_rad.cos() * params.note_diameter_m / 2.0,
        offset_angle_rad.sin() * params.note_diameter_m / 2.0,
    );

    let path_start = robot_m + offset_m;
    let path_end = target_m + offset_m;

    let legs = match alliance {
        Alliance::Blue => &params.blue_stage_legs_m,
        Alliance::Red => &params.red_stage_legs_m,
    };

    !legs.iter().any(|leg| {
        segments_intersect(
            &[path_start.x, path_start.y],
            &[path_end.x, path_end.y],
            &[leg.start_m.x, leg.start_m.y],
            &[leg.end_m.x, leg.end_m.y],
        )
    })
}
