use serde::{Deserialize, Serialize};

/// Lives granted at the start of every session
pub const MAX_LIVES: u32 = 5;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    GameOver,
}

/// A word travelling down the play field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingWord {
    pub text: String,
    /// vertical offset in field pixels, 0 at spawn
    pub top: f64,
    /// horizontal offset in field pixels
    pub left: f64,
    /// pixels per motion tick
    pub speed: f64,
    pub missed: bool,
}

impl FallingWord {
    pub fn new(text: impl Into<String>, left: f64, speed: f64) -> Self {
        Self {
            text: text.into(),
            top: 0.0,
            left,
            speed,
            missed: false,
        }
    }
}

/// The single mutable aggregate every tick and input step operates on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub lives: u32,
    pub elapsed_secs: u32,
    pub total_chars_typed: usize,
    pub wpm: u32,
    pub active_words: Vec<FallingWord>,
    pub phase: Phase,
    /// raw text-entry value as last forwarded by the host
    pub input: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            lives: MAX_LIVES,
            elapsed_secs: 0,
            total_chars_typed: 0,
            wpm: 0,
            active_words: Vec::new(),
            phase: Phase::Idle,
            input: String::new(),
        }
    }
}

impl SessionState {
    /// Back to the fresh-session values; phase is left to the caller
    pub fn reset(&mut self) {
        let phase = self.phase;
        *self = Self {
            phase,
            ..Self::default()
        };
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
