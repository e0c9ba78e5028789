use crate::scene::{Scene, SURPRISE_SCALE};

/// Bob height of the floating envelope.
pub const BOB_AMPLITUDE: f64 = 0.15;
/// Peak tilt of the envelope around Z, in radians.
pub const TILT_AMPLITUDE: f64 = 0.05;
/// Peak deviation of the heart's scale.
pub const PULSE_AMPLITUDE: f64 = 0.1;

/// Idle float of the closed envelope at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdlePose {
    pub bob: f64,
    pub tilt: f64,
    pub heart_scale: f64,
}

impl IdlePose {
    pub fn at(t: f64) -> Self {
        IdlePose {
            bob: BOB_AMPLITUDE * t.sin(),
            tilt: TILT_AMPLITUDE * (t * 0.5).sin(),
            heart_scale: SURPRISE_SCALE + PULSE_AMPLITUDE * (t * 3.0).sin(),
        }
    }

    pub fn apply(&self, scene: &mut Scene) {
        let card = scene.card;
        let envelope = scene.transform_mut(card.envelope);
        envelope.position[1] = self.bob;
        envelope.rotation[2] = self.tilt;
        scene.transform_mut(card.surprise).scale = [self.heart_scale; 3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_at_zero_is_rest() {
        let pose = IdlePose::at(0.0);
        assert_eq!(pose.bob, 0.0);
        assert_eq!(pose.tilt, 0.0);
        assert_eq!(pose.heart_scale, SURPRISE_SCALE);
    }

    #[test]
    fn apply_moves_envelope_and_heart() {
        let mut scene = Scene::greeting_card();
        let pose = IdlePose::at(1.0);
        pose.apply(&mut scene);
        let envelope = scene.transform(scene.card.envelope);
        assert_eq!(envelope.position[1], BOB_AMPLITUDE * 1f64.sin());
        assert_eq!(envelope.rotation[2], TILT_AMPLITUDE * 0.5f64.sin());
        assert_eq!(scene.transform(scene.card.surprise).scale, [pose.heart_scale; 3]);
    }
}
