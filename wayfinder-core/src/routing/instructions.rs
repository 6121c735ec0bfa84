//! Turn-by-turn narration of a location sequence

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use super::{RoutingConfig, TurnThresholds};
use crate::{DisplayDistance, Weight, model::Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    fn label(self) -> &'static str {
        match self {
            TurnDirection::Left => "Turn Left",
            TurnDirection::Right => "Turn Right",
        }
    }
}

/// Category of a narrated step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Start,
    TurnLeft,
    TurnRight,
    FloorChange,
    Arrival,
}

impl From<TurnDirection> for StepKind {
    fn from(direction: TurnDirection) -> Self {
        match direction {
            TurnDirection::Left => StepKind::TurnLeft,
            TurnDirection::Right => StepKind::TurnRight,
        }
    }
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::TurnLeft => "turn_left",
            StepKind::TurnRight => "turn_right",
            StepKind::FloorChange => "floor_change",
            StepKind::Arrival => "arrival",
        }
    }

    /// Start and arrival steps are kept even when no distance is walked
    pub fn is_endpoint(self) -> bool {
        matches!(self, StepKind::Start | StepKind::Arrival)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub text: String,
    pub kind: StepKind,
    /// Distance walked since the previous step, in display units
    pub distance: DisplayDistance,
}

impl InstructionStep {
    fn new(kind: StepKind, text: String, distance: DisplayDistance) -> Self {
        Self {
            text,
            kind,
            distance,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Instructions {
    pub steps: Vec<InstructionStep>,
    /// Sum of the distances of all steps
    pub total_distance: DisplayDistance,
}

/// Converts a location sequence into narrated steps
///
/// Every transition adds its planar length to the current segment. A floor
/// change or a detected turn closes the segment with a step, the final
/// transition always closes it with the arrival step. Steps that close an
/// empty segment are dropped, except start and arrival.
pub fn synthesize(path: &[Location], config: &RoutingConfig) -> Instructions {
    let Some(first) = path.first() else {
        return Instructions::default();
    };

    let mut steps = vec![InstructionStep::new(
        StepKind::Start,
        format!("Start at {}", first.name),
        0,
    )];
    if path.len() == 1 {
        steps.push(arrival(first, 0));
    }

    let mut segment: Weight = 0.0;
    for (i, pair) in path.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        segment += current.planar_distance(next);

        if current.floor != next.floor {
            steps.push(InstructionStep::new(
                StepKind::FloorChange,
                format!("Take {} to Floor {}", next.name, next.floor),
                config.display_distance(segment),
            ));
            segment = 0.0;
        } else if let Some(after) = path.get(i + 2)
            && let Some(direction) = detect_turn(current, next, after, &config.turn)
        {
            steps.push(InstructionStep::new(
                direction.into(),
                format!(
                    "Go straight, then {} at {}",
                    direction.label(),
                    landmark_name(next)
                ),
                config.display_distance(segment),
            ));
            segment = 0.0;
        }

        if i == path.len() - 2 {
            steps.push(arrival(next, config.display_distance(segment)));
        }
    }

    steps.retain(|step| step.distance != 0 || step.kind.is_endpoint());
    let total_distance = steps
        .iter()
        .fold(0, |total: DisplayDistance, step| total.saturating_add(step.distance));

    Instructions {
        steps,
        total_distance,
    }
}

/// Signed change of direction at `via`, in degrees within (-180, 180]
///
/// Positive values turn counter-clockwise in the coordinate system of the
/// floor plan.
pub fn turn_angle(from: &Location, via: &Location, to: &Location) -> f64 {
    let incoming = from.bearing_to(via);
    let outgoing = via.bearing_to(to);

    let mut diff = outgoing - incoming;
    while diff <= -PI {
        diff += TAU;
    }
    while diff > PI {
        diff -= TAU;
    }

    diff.to_degrees()
}

/// Turn narrated at `via`, `None` when walking straight through
///
/// Near-reversals (beyond `max_angle`) are walked through as well.
pub fn detect_turn(
    from: &Location,
    via: &Location,
    to: &Location,
    thresholds: &TurnThresholds,
) -> Option<TurnDirection> {
    let degrees = turn_angle(from, via, to);
    let TurnThresholds {
        min_angle,
        max_angle,
    } = *thresholds;

    if degrees > min_angle && degrees < max_angle {
        Some(TurnDirection::Left)
    } else if degrees < -min_angle && degrees > -max_angle {
        Some(TurnDirection::Right)
    } else {
        None
    }
}

fn arrival(location: &Location, distance: DisplayDistance) -> InstructionStep {
    InstructionStep::new(
        StepKind::Arrival,
        format!("Arrive at {}", location.name),
        distance,
    )
}

fn landmark_name(location: &Location) -> &str {
    if location.name.contains("Corner") {
        "the corner"
    } else {
        &location.name
    }
}
