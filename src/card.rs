//! The greeting card: everything the frame loop drives, in one place.
//!
//! `Card` owns the scene and every overlay. Input arrives as `trigger`,
//! `pointer_*`, `scroll` and `press_button` calls; time arrives through
//! `frame`. State changes go through [`dispatch`] and the returned effects
//! are executed here.

use crate::celebration::Celebration;
use crate::color::palette;
use crate::confetti::ConfettiField;
use crate::content::{CardContent, ContentRegion, EntryPrompt};
use crate::graphics::FrameBuffer;
use crate::idle::IdlePose;
use crate::machine::{dispatch, CardEvent, CardState, Effect, TriggerSource};
use crate::particles::ParticleSet;
use crate::scene::Scene;
use crate::sequencer::{OpenSequence, SequenceStep, Stage};
use crate::viewport::{Rect, Viewport};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scene rotation per unit of pointer offset from the center.
pub const PARALLAX: f64 = 0.05;

pub struct Card {
    scene: Scene,
    particles: ParticleSet,
    confetti: ConfettiField,
    state: CardState,
    hit_test_enabled: bool,
    sequence: Option<OpenSequence>,
    sequences_started: usize,
    prompt: Option<EntryPrompt>,
    content: ContentRegion,
    celebration: Celebration,
    viewport: Viewport,
    /// Last pointer position in normalized device coordinates.
    pointer: [f64; 2],
}

impl Card {
    /// Builds a closed card. The same `seed` always scatters the same hearts.
    pub fn new(
        content: CardContent,
        particle_count: usize,
        seed: Option<u64>,
        viewport: Viewport,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = ParticleSet::scatter(particle_count, &mut rng);
        let confetti = ConfettiField::new(StdRng::seed_from_u64(rng.gen()));

        let mut card = Card {
            scene: Scene::greeting_card(),
            particles,
            confetti,
            state: CardState::Closed,
            hit_test_enabled: true,
            sequence: None,
            sequences_started: 0,
            prompt: Some(EntryPrompt::default()),
            content: ContentRegion::new(content, viewport),
            celebration: Celebration::new(),
            viewport,
            pointer: [0.0, 0.0],
        };
        card.resize(viewport.cols, viewport.rows);
        info!(
            "event=card_ready particles={} viewport={}x{}",
            particle_count, viewport.cols, viewport.rows
        );
        card
    }

    /// Advances every animation to elapsed time `t` and returns the
    /// acknowledgement messages that are now due.
    pub fn frame(&mut self, t: f64) -> Vec<String> {
        self.particles.drift(t);

        if self.state == CardState::Closed {
            IdlePose::at(t).apply(&mut self.scene);
        }

        let root = self.scene.root;
        self.scene.transform_mut(root).rotation =
            [self.pointer[1] * PARALLAX, self.pointer[0] * PARALLAX, 0.0];

        let expired = self.prompt.as_mut().is_some_and(|prompt| prompt.update(t));
        if expired {
            self.prompt = None;
            debug!("event=prompt_removed");
        }

        let mut step = SequenceStep::default();
        if let Some(sequence) = self.sequence.as_mut() {
            let mut stage = Stage {
                scene: &mut self.scene,
                content: &mut self.content,
            };
            step = sequence.advance(t, &mut stage);
        }
        if step.revealed {
            info!(
                "event=content_reveal at={t:.3} buttons={}",
                self.content.content().buttons.len()
            );
        }
        if step.finished {
            self.sequence = None;
            self.handle(CardEvent::SequenceFinished, t);
        }

        self.confetti.step();
        self.celebration.due(t)
    }

    /// Asks the card to open. Returns `false` when the request is ignored
    /// because the card is already opening or open.
    pub fn trigger(&mut self, source: TriggerSource, t: f64) -> bool {
        if !self.state.accepts_trigger() {
            debug!("event=trigger_ignored source={source:?} state={:?}", self.state);
            return false;
        }
        self.handle(CardEvent::Trigger(source), t);
        true
    }

    /// Primary click at a viewport cell. A visible button celebrates; the
    /// entry prompt or a ray hit on the envelope opens a closed card.
    pub fn pointer_click(&mut self, col: u16, row: u16, t: f64) {
        if let Some((index, rect)) = self.content.button_at(col, row) {
            self.celebrate(index, rect, t);
            return;
        }
        let on_prompt = self
            .prompt
            .as_ref()
            .is_some_and(|prompt| prompt.rect(self.viewport).contains(col, row));
        if on_prompt {
            debug!("event=prompt_clicked col={col} row={row}");
            self.trigger(TriggerSource::Prompt, t);
            return;
        }
        if !self.hit_test_enabled {
            return;
        }
        let ndc = self.viewport.ndc(col, row);
        self.pointer = ndc;
        if self.scene.hit_envelope(ndc) {
            debug!("event=envelope_hit col={col} row={row}");
            self.trigger(TriggerSource::Pointer, t);
        }
    }

    /// Pointer motion tilts the whole scene slightly towards the pointer.
    pub fn pointer_move(&mut self, col: u16, row: u16) {
        self.pointer = self.viewport.ndc(col, row);
    }

    pub fn scroll(&mut self, delta: isize) {
        self.content.scroll_by(delta);
    }

    /// Presses button `index` as if it were clicked. Returns `false` when
    /// that button is not on screen.
    pub fn press_button(&mut self, index: usize, t: f64) -> bool {
        let rect = self
            .content
            .button_rects()
            .into_iter()
            .find(|(i, _)| *i == index)
            .map(|(_, rect)| rect);
        match rect {
            Some(rect) => {
                self.celebrate(index, rect, t);
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::new(cols, rows);
        let (width, height) = self.viewport.pixel_size();
        self.scene.set_viewport(width, height);
        self.confetti.set_aspect(width as f64 / height as f64);
        self.content.resize(self.viewport);
    }

    /// Draws the 3D layer: background, envelope, hearts and confetti.
    pub fn render_scene(&self, frame: &mut FrameBuffer, wireframe: bool) {
        frame.clear(self.scene.background);
        if wireframe {
            self.scene.render_wireframe(frame, palette::DEEP_RED);
        } else {
            self.scene.render(frame);
        }
        self.particles.render(&self.scene, frame);
        self.confetti.render(frame);
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn confetti(&self) -> &ConfettiField {
        &self.confetti
    }

    pub fn prompt(&self) -> Option<&EntryPrompt> {
        self.prompt.as_ref()
    }

    pub fn content(&self) -> &ContentRegion {
        &self.content
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hit_test_enabled(&self) -> bool {
        self.hit_test_enabled
    }

    /// Number of opening sequences started so far. Never more than one.
    pub fn sequences_started(&self) -> usize {
        self.sequences_started
    }

    pub fn pending_acknowledgements(&self) -> usize {
        self.celebration.pending()
    }

    fn celebrate(&mut self, index: usize, rect: Rect, t: f64) {
        info!("event=button_pressed index={index}");
        let message = self.content.content().acknowledgement.clone();
        self.celebration
            .celebrate(&rect, self.viewport, t, &message, &mut self.confetti);
    }

    fn handle(&mut self, event: CardEvent, t: f64) {
        let transition = dispatch(self.state, event);
        if transition.next != self.state {
            info!(
                "event=state_change from={:?} to={:?} cause={event:?}",
                self.state, transition.next
            );
        }
        self.state = transition.next;
        for effect in transition.effects {
            self.perform(effect, t);
        }
    }

    fn perform(&mut self, effect: Effect, t: f64) {
        match effect {
            Effect::HidePrompt => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.hide(t);
                }
            }
            Effect::DisableHitTest => self.hit_test_enabled = false,
            Effect::StartSequence => {
                self.sequence = Some(OpenSequence::new(&self.scene, t));
                self.sequences_started += 1;
            }
            Effect::EnableScroll => self.content.enable_scroll(),
        }
    }
}
