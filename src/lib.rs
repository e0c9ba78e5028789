//! A 3D greeting card envelope rendered in the terminal.
//!
//! The envelope floats over a field of drifting hearts until it is clicked
//! (or Enter is pressed). It then opens in a scripted sequence, flies away
//! and reveals the card text underneath. Buttons on the card fire confetti.

pub mod card;
pub mod celebration;
pub mod clock;
pub mod color;
pub mod confetti;
pub mod config;
pub mod content;
pub mod error;
pub mod graphics;
pub mod idle;
pub mod logging;
pub mod machine;
pub mod math;
pub mod particles;
pub mod scene;
pub mod sequencer;
pub mod state;
pub mod terminal;
pub mod tween;
pub mod vertex;
pub mod viewport;

pub use card::Card;
pub use error::{CardError, Result};
pub use machine::{CardState, TriggerSource};
