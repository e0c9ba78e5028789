//! Open/close interaction state machine.
//!
//! `Closed -> Opening -> Open`, with `Open` terminal. [`dispatch`] is pure: it
//! returns the next state plus the side effects the caller must perform, so
//! the transition table can be checked without a terminal or a clock.

/// Where the card is in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Closed,
    Opening,
    Open,
}

impl CardState {
    /// Input that can open the card is only accepted while closed.
    pub fn accepts_trigger(self) -> bool {
        self == CardState::Closed
    }
}

/// What asked the card to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// Pointer ray hit the envelope.
    Pointer,
    /// The entry prompt was activated from the keyboard.
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    Trigger(TriggerSource),
    SequenceFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    HidePrompt,
    DisableHitTest,
    StartSequence,
    EnableScroll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: CardState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: CardState) -> Self {
        Transition {
            next: state,
            effects: Vec::new(),
        }
    }
}

pub fn dispatch(state: CardState, event: CardEvent) -> Transition {
    match (state, event) {
        (CardState::Closed, CardEvent::Trigger(_)) => Transition {
            next: CardState::Opening,
            effects: vec![Effect::HidePrompt, Effect::DisableHitTest, Effect::StartSequence],
        },
        (CardState::Opening, CardEvent::SequenceFinished) => Transition {
            next: CardState::Open,
            effects: vec![Effect::EnableScroll],
        },
        (state, _) => Transition::stay(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTER: CardEvent = CardEvent::Trigger(TriggerSource::Pointer);
    const PROMPT: CardEvent = CardEvent::Trigger(TriggerSource::Prompt);

    #[test]
    fn trigger_while_closed_starts_opening() {
        for event in [POINTER, PROMPT] {
            let t = dispatch(CardState::Closed, event);
            assert_eq!(t.next, CardState::Opening);
            assert_eq!(
                t.effects,
                vec![Effect::HidePrompt, Effect::DisableHitTest, Effect::StartSequence]
            );
        }
    }

    #[test]
    fn trigger_is_ignored_once_opening_or_open() {
        for state in [CardState::Opening, CardState::Open] {
            for event in [POINTER, PROMPT] {
                assert_eq!(dispatch(state, event), Transition::stay(state));
            }
        }
    }

    #[test]
    fn sequence_finish_opens_and_enables_scroll() {
        let t = dispatch(CardState::Opening, CardEvent::SequenceFinished);
        assert_eq!(t.next, CardState::Open);
        assert_eq!(t.effects, vec![Effect::EnableScroll]);
    }

    #[test]
    fn stray_sequence_finish_is_ignored() {
        for state in [CardState::Closed, CardState::Open] {
            assert_eq!(dispatch(state, CardEvent::SequenceFinished), Transition::stay(state));
        }
    }

    #[test]
    fn only_closed_accepts_triggers() {
        assert!(CardState::Closed.accepts_trigger());
        assert!(!CardState::Opening.accepts_trigger());
        assert!(!CardState::Open.accepts_trigger());
    }
}
