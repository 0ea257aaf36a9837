use crate::session::{SessionState, MAX_LIVES};

/// Result of taking a life away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    Remaining(u32),
    /// lives hit zero; the session must end this tick
    Depleted,
}

pub fn lose_life(state: &mut SessionState) -> LifeOutcome {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        LifeOutcome::Depleted
    } else {
        LifeOutcome::Remaining(state.lives)
    }
}

/// Add lives back, capped at `MAX_LIVES`
pub fn grant_lives(state: &mut SessionState, n: u32) -> u32 {
    state.lives = state.lives.saturating_add(n).min(MAX_LIVES);
    state.lives
}

pub fn is_depleted(state: &SessionState) -> bool {
    state.lives == 0
}
