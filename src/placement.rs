//! Horizontal placement of freshly spawned words.
//!
//! Placement is best-effort: after `MAX_ATTEMPTS` rejected candidates the last
//! one is accepted even if it overlaps a neighbour. Termination wins over spacing.

use rand::Rng;

pub const MAX_ATTEMPTS: u32 = 10;
/// Extra clearance required between two words on top of the word width
pub const MIN_GAP: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub attempts: u32,
    /// false when the retry budget ran out and an overlapping spot was kept
    pub clear: bool,
}

pub fn place<R: Rng + ?Sized>(
    existing: &[f64],
    field_width: f64,
    word_width: f64,
    rng: &mut R,
) -> f64 {
    plan(existing, field_width, word_width, rng).left
}

pub fn plan<R: Rng + ?Sized>(
    existing: &[f64],
    field_width: f64,
    word_width: f64,
    rng: &mut R,
) -> Placement {
    let span = candidate_span(field_width, word_width);
    let min_distance = word_width.max(0.0) + MIN_GAP;

    let mut left = 0.0;
    for attempt in 1..=MAX_ATTEMPTS {
        left = if span > 0.0 { rng.gen_range(0.0..span) } else { 0.0 };
        if !existing.iter().any(|p| (p - left).abs() < min_distance) {
            return Placement {
                left,
                attempts: attempt,
                clear: true,
            };
        }
    }

    log::trace!("placement contention, accepting overlap at {left:.1}");
    Placement {
        left,
        attempts: MAX_ATTEMPTS,
        clear: false,
    }
}

/// Width of the range candidates are drawn from, clamped to zero
fn candidate_span(field_width: f64, word_width: f64) -> f64 {
    let span = field_width - word_width;
    if span.is_finite() && span > 0.0 {
        span
    } else {
        0.0
    }
}
