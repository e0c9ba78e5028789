//! Property tweens and a timeline that schedules them.
//!
//! A [`Tween`] moves one or more [`Property`] channels from the value they
//! hold when the tween starts to a fixed end value. A [`Timeline`] places
//! tweens on a shared local clock, either at an absolute time or relative
//! to the current end of the timeline, and writes values through a
//! [`PropertyTarget`].
//!
//! # Invariants
//!
//! 1. Start values are captured once, on the first update at or past the
//!    tween's start time.
//! 2. A tween's end value is written exactly when its active time elapses,
//!    even if the frame that crosses the end lands far past it.
//! 3. The timeline reports completion once.

use crate::scene::NodeId;

/// Maps normalized time in [0, 1] to normalized progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in.
    Power1In,
    /// Quadratic ease-out.
    Power1Out,
    /// Quadratic ease-in-out.
    Power1InOut,
    /// Cubic ease-in.
    Power2In,
    /// Cubic ease-out.
    Power2Out,
    /// Cubic ease-in-out.
    Power2InOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1In => t * t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Power2In => t * t * t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A single animatable scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Position(NodeId, Axis),
    Rotation(NodeId, Axis),
    Scale(NodeId, Axis),
    Camera(Axis),
    ContentOpacity,
}

/// Anything a tween can read from and write to.
pub trait PropertyTarget {
    fn get(&self, property: Property) -> f64;
    fn set(&mut self, property: Property, value: f64);

    /// Called when the tween labelled `label` starts, before its start
    /// values are captured.
    fn started(&mut self, _label: &'static str) {}
}

#[derive(Debug, Clone)]
struct Channel {
    property: Property,
    from: f64,
    to: f64,
}

#[derive(Debug, Clone)]
pub struct Tween {
    label: &'static str,
    channels: Vec<Channel>,
    duration: f64,
    easing: Easing,
    repeat: u32,
    yoyo: bool,
}

impl Tween {
    pub fn new(label: &'static str, duration: f64) -> Self {
        Tween {
            label,
            channels: Vec::new(),
            duration: duration.max(f64::EPSILON),
            easing: Easing::Power1Out,
            repeat: 0,
            yoyo: false,
        }
    }

    /// Adds a channel ending at `to`.
    pub fn to(mut self, property: Property, to: f64) -> Self {
        self.channels.push(Channel {
            property,
            from: 0.0,
            to,
        });
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Plays the tween `repeat` more times, alternating direction.
    pub fn yoyo(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self.yoyo = true;
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Active time including repeats.
    pub fn total_duration(&self) -> f64 {
        self.duration * f64::from(self.repeat + 1)
    }

    /// Eased progress at `local` seconds after the tween started.
    pub fn progress(&self, local: f64) -> f64 {
        let total = self.total_duration();
        let (cycle, frac) = if local >= total {
            (self.repeat, 1.0)
        } else {
            let local = local.max(0.0);
            let cycle = (local / self.duration).floor() as u32;
            (cycle, (local - f64::from(cycle) * self.duration) / self.duration)
        };
        if self.yoyo && cycle % 2 == 1 {
            self.easing.apply(1.0 - frac)
        } else {
            self.easing.apply(frac)
        }
    }

    fn capture<T: PropertyTarget + ?Sized>(&mut self, target: &T) {
        for channel in &mut self.channels {
            channel.from = target.get(channel.property);
        }
    }

    fn write<T: PropertyTarget + ?Sized>(&self, local: f64, target: &mut T) {
        let p = self.progress(local);
        for channel in &self.channels {
            let value = if p >= 1.0 {
                channel.to
            } else {
                channel.from + (channel.to - channel.from) * p
            };
            target.set(channel.property, value);
        }
    }
}

/// Where a tween goes on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// At the current end of the timeline.
    End,
    /// `δ` seconds before the current end of the timeline.
    Overlap(f64),
    /// At an absolute timeline time.
    At(f64),
}

#[derive(Debug, Clone)]
struct Entry {
    start: f64,
    tween: Tween,
    started: bool,
    done: bool,
}

/// What happened during one [`Timeline::advance`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimelineStep {
    pub started: Vec<&'static str>,
    pub finished: Vec<&'static str>,
    pub completed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    duration: f64,
    completed: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `tween` and returns its start time.
    pub fn add(&mut self, tween: Tween, position: Position) -> f64 {
        let start = match position {
            Position::End => self.duration,
            Position::Overlap(delta) => (self.duration - delta).max(0.0),
            Position::At(t) => t.max(0.0),
        };
        self.duration = self.duration.max(start + tween.total_duration());
        self.entries.push(Entry {
            start,
            tween,
            started: false,
            done: false,
        });
        start
    }

    /// End time of the last tween.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Moves the timeline to local time `time` (seconds). Time only moves
    /// forward; earlier times leave finished tweens alone.
    pub fn advance<T: PropertyTarget + ?Sized>(&mut self, time: f64, target: &mut T) -> TimelineStep {
        let mut step = TimelineStep::default();
        if self.completed {
            return step;
        }

        for entry in &mut self.entries {
            if entry.done || time < entry.start {
                continue;
            }
            if !entry.started {
                target.started(entry.tween.label);
                entry.tween.capture(target);
                entry.started = true;
                step.started.push(entry.tween.label);
            }
            let local = time - entry.start;
            entry.tween.write(local, target);
            if local >= entry.tween.total_duration() {
                entry.done = true;
                step.finished.push(entry.tween.label);
            }
        }

        if time >= self.duration && self.entries.iter().all(|entry| entry.done) {
            self.completed = true;
            step.completed = true;
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Values(HashMap<String, f64>);

    impl PropertyTarget for Values {
        fn get(&self, property: Property) -> f64 {
            self.0.get(&format!("{property:?}")).copied().unwrap_or(0.0)
        }

        fn set(&mut self, property: Property, value: f64) {
            self.0.insert(format!("{property:?}"), value);
        }
    }

    const A: Property = Property::Camera(Axis::X);
    const B: Property = Property::Camera(Axis::Y);

    #[test]
    fn easings_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Power1In,
            Easing::Power1Out,
            Easing::Power1InOut,
            Easing::Power2In,
            Easing::Power2Out,
            Easing::Power2InOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
            assert!((easing.apply(0.5) - 0.5).abs() <= 0.5);
        }
        assert_eq!(Easing::Power1InOut.apply(0.5), 0.5);
        assert_eq!(Easing::Power2InOut.apply(0.5), 0.5);
        assert!(Easing::Power2In.apply(0.3) < Easing::Linear.apply(0.3));
        assert!(Easing::Power2Out.apply(0.3) > Easing::Linear.apply(0.3));
    }

    #[test]
    fn overlap_is_measured_from_timeline_end() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.add(Tween::new("a", 1.0), Position::End), 0.0);
        assert_eq!(timeline.add(Tween::new("b", 0.5), Position::Overlap(0.5)), 0.5);
        let c = timeline.add(Tween::new("c", 0.8), Position::Overlap(0.3));
        assert!((c - 0.7).abs() < 1e-12);
        assert!((timeline.duration() - 1.5).abs() < 1e-12);
        assert_eq!(timeline.add(Tween::new("d", 1.0), Position::Overlap(5.0)), 0.0);
    }

    #[test]
    fn start_value_is_captured_when_the_tween_starts() {
        let mut values = Values::default();
        let mut timeline = Timeline::new();
        timeline.add(Tween::new("late", 1.0).to(A, 10.0).easing(Easing::Linear), Position::At(1.0));

        values.set(A, 2.0);
        timeline.advance(0.5, &mut values);
        assert_eq!(values.get(A), 2.0);

        values.set(A, 4.0);
        let step = timeline.advance(1.0, &mut values);
        assert_eq!(step.started, vec!["late"]);
        timeline.advance(1.5, &mut values);
        assert_eq!(values.get(A), 7.0);
    }

    #[test]
    fn large_step_lands_exactly_on_end_values() {
        let mut values = Values::default();
        let mut timeline = Timeline::new();
        timeline.add(Tween::new("a", 1.0).to(A, 3.0).easing(Easing::Power2InOut), Position::End);
        timeline.add(Tween::new("b", 1.0).to(B, -1.0), Position::End);

        let step = timeline.advance(100.0, &mut values);
        assert_eq!(values.get(A), 3.0);
        assert_eq!(values.get(B), -1.0);
        assert_eq!(step.started, vec!["a", "b"]);
        assert_eq!(step.finished, vec!["a", "b"]);
        assert!(step.completed);
    }

    #[test]
    fn completion_is_reported_once() {
        let mut values = Values::default();
        let mut timeline = Timeline::new();
        timeline.add(Tween::new("a", 0.2).to(A, 1.0), Position::End);
        assert!(!timeline.advance(0.1, &mut values).completed);
        assert!(timeline.advance(0.2, &mut values).completed);
        assert!(timeline.is_complete());
        assert_eq!(timeline.advance(0.3, &mut values), TimelineStep::default());
    }

    #[test]
    fn yoyo_returns_to_start() {
        let mut values = Values::default();
        values.set(A, 1.0);
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new("pulse", 0.5).to(A, 1.1).easing(Easing::Linear).yoyo(1),
            Position::End,
        );
        assert_eq!(timeline.duration(), 1.0);

        timeline.advance(0.0, &mut values);
        timeline.advance(0.5, &mut values);
        assert!((values.get(A) - 1.1).abs() < 1e-12);
        timeline.advance(0.75, &mut values);
        assert!((values.get(A) - 1.05).abs() < 1e-12);
        timeline.advance(1.0, &mut values);
        assert_eq!(values.get(A), 1.0);
    }
}
