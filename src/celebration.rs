//! Button celebration: a confetti burst at the button, then a blocking
//! acknowledgement after a short delay.
//!
//! There is no state machine here. Each press emits its own burst and
//! schedules its own acknowledgement.

use crate::color::{palette, Rgb};
use crate::error::Result;
use crate::viewport::{Rect, Viewport};
use log::info;

pub const BURST_COUNT: usize = 150;
/// Launch cone in degrees.
pub const BURST_SPREAD: f64 = 100.0;
/// Seconds between the burst and the acknowledgement.
pub const ACKNOWLEDGE_DELAY: f64 = 1.5;
pub const BURST_COLORS: [Rgb; 3] = [palette::LOVE_RED, palette::LOVE_PINK, Rgb::WHITE];

/// Request for a burst of decorative particles.
#[derive(Debug, Clone, PartialEq)]
pub struct BurstRequest {
    pub count: usize,
    pub spread: f64,
    /// Viewport fraction, origin top-left.
    pub origin: [f64; 2],
    pub colors: Vec<Rgb>,
}

/// Receives burst requests. Fire and forget.
pub trait BurstSink {
    fn burst(&mut self, request: &BurstRequest);
}

/// Shows a dismiss-only message. Implementations may block.
pub trait Acknowledger {
    fn acknowledge(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    due_at: f64,
    message: String,
}

#[derive(Debug, Default)]
pub struct Celebration {
    pending: Vec<Pending>,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bursts confetti from the center of `button` and schedules `message`
    /// for acknowledgement [`ACKNOWLEDGE_DELAY`] seconds after `now`.
    pub fn celebrate(
        &mut self,
        button: &Rect,
        viewport: Viewport,
        now: f64,
        message: &str,
        sink: &mut dyn BurstSink,
    ) {
        let origin = viewport.normalized_center(button);
        info!(
            "event=celebrate origin=({:.3},{:.3}) count={}",
            origin[0], origin[1], BURST_COUNT
        );
        sink.burst(&BurstRequest {
            count: BURST_COUNT,
            spread: BURST_SPREAD,
            origin,
            colors: BURST_COLORS.to_vec(),
        });
        self.pending.push(Pending {
            due_at: now + ACKNOWLEDGE_DELAY,
            message: message.to_string(),
        });
    }

    /// Removes and returns every message whose delay has elapsed, oldest first.
    pub fn due(&mut self, now: f64) -> Vec<String> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|pending| pending.due_at <= now);
        self.pending = waiting;
        due.into_iter().map(|pending| pending.message).collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
