use crate::session::SessionState;

/// Characters per "word" in the WPM approximation
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched { text: String },
    NoMatch,
    /// input arrived while no session was running
    Ignored,
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `round(chars / 5 / minutes)` with elapsed minutes floored at one second
pub fn wpm(total_chars: usize, elapsed_secs: u32) -> u32 {
    let minutes = (elapsed_secs as f64 / 60.0).max(1.0 / 60.0);
    (total_chars as f64 / CHARS_PER_WORD / minutes).round() as u32
}

/// Credit `chars` typed characters and refresh the running WPM
pub fn record(state: &mut SessionState, chars: usize) {
    state.total_chars_typed += chars;
    state.wpm = wpm(state.total_chars_typed, state.elapsed_secs);
}

/// Match the current text-entry value against the falling words.
///
/// Only an exact (normalized) match counts. The first matching word in
/// insertion order is caught when several share the same text.
pub fn submit_input(state: &mut SessionState, raw: &str) -> MatchOutcome {
    state.input = raw.to_string();
    let needle = normalize(raw);
    if needle.is_empty() {
        return MatchOutcome::NoMatch;
    }

    let Some(idx) = state
        .active_words
        .iter()
        .position(|w| normalize(&w.text) == needle)
    else {
        return MatchOutcome::NoMatch;
    };

    let caught = state.active_words.remove(idx);
    record(state, caught.text.chars().count());
    state.input.clear();
    log::debug!("caught '{}', wpm now {}", caught.text, state.wpm);
    MatchOutcome::Matched { text: caught.text }
}
