//! The scripted opening of the envelope.
//!
//! | segment      | starts | length | ease         | change                           |
//! |--------------|--------|--------|--------------|----------------------------------|
//! | flap         | 0.0    | 1.0    | power2 inOut | flap pivot rot.x -> π            |
//! | heart        | 0.5    | 0.5    | power2 out   | heart y 0.5, z 0.5               |
//! | paper        | 0.7    | 0.8    | power2 out   | paper y H/2 + 0.8, z 0.1         |
//! | camera       | 0.7    | 1.2    | power1 inOut | camera y 1, z 3                  |
//! | pulse        | 0.9    | 2x0.5  | power1 out   | envelope scale 1.1 and back      |
//! | fly-away     | 1.9    | 1.5    | power2 in    | envelope y 10; reveals content   |
//! | content-fade | 2.4    | 1.0    | power1 out   | content opacity 1                |

use crate::content::ContentRegion;
use crate::scene::{Scene, ENVELOPE_HEIGHT};
use crate::tween::{Axis, Easing, Position, Property, PropertyTarget, Timeline, Tween};
use log::{debug, info};
use std::f64::consts::PI;

pub const FLY_AWAY: &str = "fly-away";
/// Delay between the envelope starting to fly away and the content fade.
pub const CONTENT_FADE_DELAY: f64 = 0.5;

/// Everything the sequence animates, borrowed for one frame.
pub struct Stage<'a> {
    pub scene: &'a mut Scene,
    pub content: &'a mut ContentRegion,
}

impl PropertyTarget for Stage<'_> {
    fn get(&self, property: Property) -> f64 {
        match property {
            Property::Position(node, axis) => self.scene.transform(node).position[axis.index()],
            Property::Rotation(node, axis) => self.scene.transform(node).rotation[axis.index()],
            Property::Scale(node, axis) => self.scene.transform(node).scale[axis.index()],
            Property::Camera(axis) => self.scene.camera.position[axis.index()],
            Property::ContentOpacity => self.content.opacity(),
        }
    }

    fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::Position(node, axis) => {
                self.scene.transform_mut(node).position[axis.index()] = value
            }
            Property::Rotation(node, axis) => {
                self.scene.transform_mut(node).rotation[axis.index()] = value
            }
            Property::Scale(node, axis) => {
                self.scene.transform_mut(node).scale[axis.index()] = value
            }
            Property::Camera(axis) => self.scene.camera.position[axis.index()] = value,
            Property::ContentOpacity => self.content.set_opacity(value),
        }
    }

    fn started(&mut self, label: &'static str) {
        debug!("event=segment_start segment={label}");
        if label == FLY_AWAY {
            self.content.unhide();
        }
    }
}

/// Outcome of one [`OpenSequence::advance`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStep {
    pub revealed: bool,
    pub finished: bool,
}

pub struct OpenSequence {
    timeline: Timeline,
    started_at: f64,
}

impl OpenSequence {
    /// Builds the timeline for `scene`, starting at elapsed time `now`.
    pub fn new(scene: &Scene, now: f64) -> Self {
        let card = scene.card;
        let mut timeline = Timeline::new();

        timeline.add(
            Tween::new("flap", 1.0)
                .to(Property::Rotation(card.flap_pivot, Axis::X), PI)
                .easing(Easing::Power2InOut),
            Position::End,
        );
        timeline.add(
            Tween::new("heart", 0.5)
                .to(Property::Position(card.surprise, Axis::Z), 0.5)
                .to(Property::Position(card.surprise, Axis::Y), 0.5)
                .easing(Easing::Power2Out),
            Position::Overlap(0.5),
        );
        timeline.add(
            Tween::new("paper", 0.8)
                .to(Property::Position(card.paper, Axis::Y), ENVELOPE_HEIGHT / 2.0 + 0.8)
                .to(Property::Position(card.paper, Axis::Z), 0.1)
                .easing(Easing::Power2Out),
            Position::Overlap(0.3),
        );
        timeline.add(
            Tween::new("camera", 1.2)
                .to(Property::Camera(Axis::Z), 3.0)
                .to(Property::Camera(Axis::Y), 1.0)
                .easing(Easing::Power1InOut),
            Position::Overlap(0.8),
        );
        timeline.add(
            Tween::new("pulse", 0.5)
                .to(Property::Scale(card.envelope, Axis::X), 1.1)
                .to(Property::Scale(card.envelope, Axis::Y), 1.1)
                .to(Property::Scale(card.envelope, Axis::Z), 1.1)
                .yoyo(1),
            Position::Overlap(1.0),
        );
        let fly_start = timeline.add(
            Tween::new(FLY_AWAY, 1.5)
                .to(Property::Position(card.envelope, Axis::Y), 10.0)
                .easing(Easing::Power2In),
            Position::End,
        );
        timeline.add(
            Tween::new("content-fade", 1.0).to(Property::ContentOpacity, 1.0),
            Position::At(fly_start + CONTENT_FADE_DELAY),
        );

        info!(
            "event=sequence_start at={now:.3} duration={:.3}",
            timeline.duration()
        );
        OpenSequence {
            timeline,
            started_at: now,
        }
    }

    /// Total length in seconds, overlaps included.
    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    /// Moves the sequence to elapsed time `now`.
    pub fn advance(&mut self, now: f64, stage: &mut Stage<'_>) -> SequenceStep {
        let step = self.timeline.advance(now - self.started_at, stage);
        if step.completed {
            info!("event=sequence_complete");
        }
        SequenceStep {
            revealed: step.started.contains(&FLY_AWAY),
            finished: step.completed,
        }
    }
}
