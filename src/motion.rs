use crate::lives::{self, LifeOutcome};
use crate::session::SessionState;

/// Distance above the field floor at which a word counts as missed
pub const FLOOR_MARGIN: f64 = 30.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionReport {
    pub misses: u32,
    /// lives reached zero during this tick
    pub depleted: bool,
}

/// Move every active word down by its speed and drop the ones that reach the floor.
///
/// The surviving set replaces `active_words` in one assignment at the end.
pub fn advance(state: &mut SessionState, floor_y: f64) -> MotionReport {
    let threshold = floor_y - FLOOR_MARGIN;
    let mut report = MotionReport::default();
    let mut survivors = Vec::with_capacity(state.active_words.len());

    for mut word in std::mem::take(&mut state.active_words) {
        let new_top = word.top + word.speed;
        if new_top >= threshold {
            if !word.missed {
                word.missed = true;
                report.misses += 1;
                log::debug!("missed '{}'", word.text);
                if lives::lose_life(state) == LifeOutcome::Depleted {
                    report.depleted = true;
                }
            }
        } else {
            word.top = new_top;
            survivors.push(word);
        }
    }

    state.active_words = survivors;
    report
}
