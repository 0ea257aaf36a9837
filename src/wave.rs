//! Elapsed-time difficulty table and the spawner that reads it.

use rand::Rng;

use crate::placement;
use crate::session::{FallingWord, SessionState};
use crate::words::WordSource;

/// Estimated on-screen width of one character, in field pixels
pub const CHAR_WIDTH: f64 = 14.0;

/// Difficulty bucket active at a given elapsed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub count: usize,
    pub speed_factor: f64,
}

impl Wave {
    pub fn at(elapsed_secs: u32) -> Self {
        match elapsed_secs {
            0..=19 => Wave {
                count: 1,
                speed_factor: 1.0,
            },
            20..=59 => Wave {
                count: 2,
                speed_factor: 1.3,
            },
            _ => Wave {
                count: 3,
                speed_factor: 1.1,
            },
        }
    }
}

pub fn word_width(text: &str) -> f64 {
    text.chars().count() as f64 * CHAR_WIDTH
}

/// Draw this tick's batch of words. The caller appends them to the active set.
pub fn spawn<R: Rng + ?Sized>(
    state: &SessionState,
    field_width: f64,
    words: &WordSource,
    rng: &mut R,
) -> Vec<FallingWord> {
    if words.is_empty() {
        log::warn!("word source is empty, skipping spawn");
        return Vec::new();
    }

    let wave = Wave::at(state.elapsed_secs);
    let mut positions = Vec::with_capacity(wave.count);
    let mut batch = Vec::with_capacity(wave.count);

    for _ in 0..wave.count {
        let Some(text) = words.pick(rng) else {
            break;
        };
        let left = placement::place(&positions, field_width, word_width(text), rng);
        positions.push(left);

        let speed = (0.5 + rng.gen::<f64>()) * wave.speed_factor;
        batch.push(FallingWord::new(text, left, speed));
    }

    log::debug!(
        "spawned {} word(s) at t={}s",
        batch.len(),
        state.elapsed_secs
    );
    batch
}
