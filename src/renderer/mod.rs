//! Rendering model
//!
//! Backend-agnostic stroke lists; the canvas binding paints them.

pub mod sketch;

pub use sketch::{Projector, Stroke, fade_color, frame_strokes, player_strokes, target_strokes};
