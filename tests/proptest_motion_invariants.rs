//! Property tests for the ambient motion and the trigger guard.
//!
//! 1. Hearts never end a frame above the upper bound.
//! 2. Drift is reproducible for a seed and a time sequence.
//! 3. The closed envelope bobs exactly `0.15 * sin(t)`.
//! 4. Any number of triggers starts exactly one sequence.

use envelope3d::content::CardContent;
use envelope3d::particles::{ParticleSet, UPPER_BOUND};
use envelope3d::viewport::Viewport;
use envelope3d::{Card, CardState, TriggerSource};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn times() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1000.0, 1..120)
}

proptest! {
    #[test]
    fn hearts_stay_below_the_upper_bound(seed in any::<u64>(), ts in times()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut set = ParticleSet::scatter(64, &mut rng);
        for t in ts {
            set.drift(t);
            for position in set.positions() {
                prop_assert!(position[1] <= UPPER_BOUND, "y = {} at t = {}", position[1], t);
            }
        }
    }

    #[test]
    fn drift_is_reproducible(seed in any::<u64>(), ts in times()) {
        let viewport = Viewport::new(80, 24);
        let mut a = Card::new(CardContent::builtin(), 32, Some(seed), viewport);
        let mut b = Card::new(CardContent::builtin(), 32, Some(seed), viewport);
        for &t in &ts {
            a.frame(t);
            b.frame(t);
        }
        prop_assert_eq!(a.particles().positions(), b.particles().positions());
    }

    #[test]
    fn closed_envelope_bob_follows_sine(t in 0.0f64..10_000.0) {
        let mut card = Card::new(CardContent::builtin(), 0, Some(0), Viewport::new(80, 24));
        card.frame(t);
        let envelope = card.scene().card.envelope;
        prop_assert_eq!(card.scene().transform(envelope).position[1], 0.15 * t.sin());
    }

    #[test]
    fn triggers_start_exactly_one_sequence(
        offsets in prop::collection::vec((0.0f64..5.0, any::<bool>()), 1..20)
    ) {
        let mut card = Card::new(CardContent::builtin(), 0, Some(0), Viewport::new(80, 24));
        card.frame(0.0);
        let mut accepted = 0;
        for (t, pointer) in offsets {
            let source = if pointer { TriggerSource::Pointer } else { TriggerSource::Prompt };
            if card.trigger(source, t) {
                accepted += 1;
            }
        }
        prop_assert_eq!(accepted, 1);
        prop_assert_eq!(card.sequences_started(), 1);
        prop_assert_eq!(card.state(), CardState::Opening);
    }
}
