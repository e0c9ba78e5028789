//! Background hearts that drift upward and wrap around.
//!
//! Positions advance as a function of the elapsed time and the particle's
//! buffer index only; no velocity is stored. Given the same initial positions
//! and the same sequence of times, the result is bit-identical.

use crate::color::Rgb;
use crate::graphics::FrameBuffer;
use crate::math::Vec3;
use crate::scene::Scene;
use rand::Rng;

/// Particles above this height wrap around.
pub const UPPER_BOUND: f64 = 15.0;
/// Height a wrapped particle restarts from.
pub const LOWER_BOUND: f64 = -15.0;
/// Constant upward drift per frame.
pub const RISE: f64 = 0.02;
/// Amplitude of the vertical wave.
pub const WAVE: f64 = 0.01;
/// Amplitude of the horizontal sway.
pub const SWAY: f64 = 0.01;

const SPREAD_XY: f64 = 35.0;
const SPREAD_Z: f64 = 20.0;
const OPACITY: f64 = 0.8;
const WORLD_SIZE: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    positions: Vec<Vec3>,
    colors: Vec<Rgb>,
}

impl ParticleSet {
    /// Scatters `count` hearts in front of and behind the envelope, half of
    /// them red and half pink.
    pub fn scatter<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push([
                (rng.gen::<f64>() - 0.5) * SPREAD_XY,
                (rng.gen::<f64>() - 0.5) * SPREAD_XY,
                (rng.gen::<f64>() - 0.5) * SPREAD_Z - 10.0,
            ]);
            let color = if rng.gen_bool(0.5) {
                Rgb::from_unit(1.0, rng.gen::<f64>() * 0.2, rng.gen::<f64>() * 0.2)
            } else {
                Rgb::from_unit(1.0, 0.6 + rng.gen::<f64>() * 0.2, 0.6 + rng.gen::<f64>() * 0.2)
            };
            colors.push(color);
        }
        ParticleSet { positions, colors }
    }

    /// Builds a set from explicit positions, all in one color.
    pub fn from_positions(positions: Vec<Vec3>, color: Rgb) -> Self {
        let colors = vec![color; positions.len()];
        ParticleSet { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Advances every particle one frame at elapsed time `t`.
    ///
    /// The sway phase is the index of the particle's y component in a flat
    /// `[x, y, z, x, y, z, ...]` buffer.
    pub fn drift(&mut self, t: f64) {
        for (i, position) in self.positions.iter_mut().enumerate() {
            position[1] += (t + position[0]).sin() * WAVE + RISE;
            if position[1] > UPPER_BOUND {
                position[1] = LOWER_BOUND;
            }
            let phase = (3 * i + 1) as f64;
            position[0] += (t * 2.0 + phase).sin() * SWAY;
        }
    }

    /// Draws the hearts as translucent dots, sized by distance. They are
    /// depth tested against the envelope but never occlude anything.
    pub fn render(&self, scene: &Scene, frame: &mut FrameBuffer) {
        let (width, height) = (frame.width(), frame.height());
        let world = scene.world_transform(scene.root);
        let focal = 1.0 / (scene.camera.fov_y / 2.0).tan();
        for (position, color) in self.positions.iter().zip(&self.colors) {
            let Some(projected) = scene.project(&world.apply(position), width, height) else {
                continue;
            };
            let footprint = WORLD_SIZE * focal * height as f64 / (2.0 * projected.depth);
            let size = footprint.clamp(1.0, 3.0) as usize;
            let [x, y] = projected.screen;
            for dy in 0..size {
                for dx in 0..size {
                    frame.plot_point(
                        x + dx as f64,
                        y + dy as f64,
                        projected.depth,
                        *color,
                        OPACITY,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scatter_fills_the_volume() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = ParticleSet::scatter(350, &mut rng);
        assert_eq!(set.len(), 350);
        for p in set.positions() {
            assert!(p[0].abs() <= SPREAD_XY / 2.0);
            assert!(p[1].abs() <= SPREAD_XY / 2.0);
            assert!((-20.0..=0.0).contains(&p[2]));
        }
        assert!(set.colors().iter().all(|c| c.r == 255));
    }

    #[test]
    fn same_seed_same_scatter() {
        let a = ParticleSet::scatter(20, &mut StdRng::seed_from_u64(1));
        let b = ParticleSet::scatter(20, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn drift_follows_the_wave_formula() {
        let mut set = ParticleSet::from_positions(vec![[0.5, 1.0, -3.0], [2.0, -4.0, -8.0]], Rgb::WHITE);
        let t = 0.75;
        set.drift(t);
        let y0 = 1.0 + (t + 0.5f64).sin() * WAVE + RISE;
        let x0 = 0.5 + (t * 2.0 + 1.0).sin() * SWAY;
        let y1 = -4.0 + (t + 2.0f64).sin() * WAVE + RISE;
        let x1 = 2.0 + (t * 2.0 + 4.0).sin() * SWAY;
        assert_eq!(set.positions()[0], [x0, y0, -3.0]);
        assert_eq!(set.positions()[1], [x1, y1, -8.0]);
    }

    #[test]
    fn particle_past_the_top_wraps_to_the_bottom() {
        let mut set = ParticleSet::from_positions(vec![[0.0, UPPER_BOUND - 0.001, -5.0]], Rgb::WHITE);
        set.drift(0.0);
        assert_eq!(set.positions()[0][1], LOWER_BOUND);
    }

    #[test]
    fn empty_set_is_fine() {
        let mut set = ParticleSet::from_positions(Vec::new(), Rgb::WHITE);
        set.drift(1.0);
        assert!(set.is_empty());
    }
}
