//! Confetti flakes drawn over the scene.
//!
//! Flakes live on a reference canvas 800 pixels tall (width follows the
//! viewport aspect) so bursts look the same at any terminal size. Each frame
//! applies one physics tick: move along the launch angle, decay the speed,
//! fall with gravity, fade out over the flake's lifetime.

use crate::celebration::{BurstRequest, BurstSink};
use crate::color::Rgb;
use crate::graphics::FrameBuffer;
use rand::rngs::StdRng;
use rand::Rng;

const REFERENCE_HEIGHT: f64 = 800.0;
const START_VELOCITY: f64 = 45.0;
const DECAY: f64 = 0.9;
const GRAVITY: f64 = 3.0;
const LIFETIME_TICKS: u32 = 200;
const LAUNCH_ANGLE_DEG: f64 = 90.0;

#[derive(Debug, Clone, PartialEq)]
struct Flake {
    x: f64,
    y: f64,
    angle: f64,
    velocity: f64,
    wobble: f64,
    color: Rgb,
    tick: u32,
}

pub struct ConfettiField {
    flakes: Vec<Flake>,
    aspect: f64,
    rng: StdRng,
}

impl ConfettiField {
    pub fn new(rng: StdRng) -> Self {
        ConfettiField {
            flakes: Vec::new(),
            aspect: 1.0,
            rng,
        }
    }

    /// Width over height of the frame the flakes are drawn on.
    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    /// One physics tick; expired flakes are dropped.
    pub fn step(&mut self) {
        for flake in &mut self.flakes {
            flake.x += flake.angle.cos() * flake.velocity;
            flake.y += flake.angle.sin() * flake.velocity + GRAVITY;
            flake.velocity *= DECAY;
            flake.wobble += 0.1;
            flake.x += flake.wobble.cos();
            flake.tick += 1;
        }
        self.flakes.retain(|flake| flake.tick < LIFETIME_TICKS);
    }

    pub fn render(&self, frame: &mut FrameBuffer) {
        let width = REFERENCE_HEIGHT * self.aspect;
        let sx = frame.width() as f64 / width;
        let sy = frame.height() as f64 / REFERENCE_HEIGHT;
        for flake in &self.flakes {
            let fade = 1.0 - f64::from(flake.tick) / f64::from(LIFETIME_TICKS);
            frame.plot_point(flake.x * sx, flake.y * sy, 0.0, flake.color, fade);
        }
    }
}

impl BurstSink for ConfettiField {
    fn burst(&mut self, request: &BurstRequest) {
        if request.colors.is_empty() {
            return;
        }
        let width = REFERENCE_HEIGHT * self.aspect;
        let (x, y) = (request.origin[0] * width, request.origin[1] * REFERENCE_HEIGHT);
        let spread = request.spread.to_radians();
        for i in 0..request.count {
            // Screen y grows downward, so "up" is a negative angle.
            let angle = -LAUNCH_ANGLE_DEG.to_radians() + (0.5 * spread - self.rng.gen::<f64>() * spread);
            self.flakes.push(Flake {
                x,
                y,
                angle,
                velocity: START_VELOCITY * 0.5 + self.rng.gen::<f64>() * START_VELOCITY,
                wobble: self.rng.gen::<f64>() * 10.0,
                color: request.colors[i % request.colors.len()],
                tick: 0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn request(count: usize) -> BurstRequest {
        BurstRequest {
            count,
            spread: 100.0,
            origin: [0.5, 0.5],
            colors: vec![Rgb::WHITE, Rgb::new(230, 57, 70)],
        }
    }

    #[test]
    fn burst_spawns_requested_count_and_expires() {
        let mut field = ConfettiField::new(StdRng::seed_from_u64(3));
        field.burst(&request(150));
        assert_eq!(field.len(), 150);
        for _ in 0..LIFETIME_TICKS {
            field.step();
        }
        assert!(field.is_empty());
    }

    #[test]
    fn flakes_launch_upward() {
        let mut field = ConfettiField::new(StdRng::seed_from_u64(9));
        field.burst(&request(50));
        field.step();
        assert!(field.flakes.iter().all(|f| f.y < REFERENCE_HEIGHT / 2.0));
    }

    #[test]
    fn burst_without_colors_is_ignored() {
        let mut field = ConfettiField::new(StdRng::seed_from_u64(1));
        field.burst(&BurstRequest {
            colors: Vec::new(),
            ..request(10)
        });
        assert!(field.is_empty());
    }

    #[test]
    fn flakes_are_drawn_near_origin() {
        let mut field = ConfettiField::new(StdRng::seed_from_u64(5));
        field.burst(&request(1));
        let mut frame = FrameBuffer::new(40, 40);
        frame.clear(Rgb::BLACK);
        field.render(&mut frame);
        assert_ne!(frame.pixel(20, 20), Rgb::BLACK);
    }
}
