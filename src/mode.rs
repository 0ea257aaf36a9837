//! Game variants. Each variant decides which periodic tasks it needs and what
//! a task or a keystroke does to the shared `SessionState`.

use clap::ValueEnum;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::motion;
use crate::scheduler::TaskKind;
use crate::score::{self, MatchOutcome};
use crate::session::SessionState;
use crate::viewport::Viewport;
use crate::wave;
use crate::words::WordSource;

/// Words shown per sprint line
pub const SPRINT_LINE_WORDS: usize = 24;
/// Length of a sprint, in seconds
pub const SPRINT_SECS: u32 = 60;

/// Collaborators a mode may consult while handling a task or input
pub struct ModeContext<'a> {
    pub words: &'a WordSource,
    pub viewport: Viewport,
    pub rng: &'a mut dyn RngCore,
}

/// Whether the session keeps running after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finished,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModeKind {
    /// catch falling words before they reach the floor
    #[default]
    Falling,
    /// classic 60 second typing test over a line of words
    Sprint,
}

impl ModeKind {
    pub fn build(&self) -> Box<dyn GameMode> {
        match self {
            ModeKind::Falling => Box::new(FallingWords),
            ModeKind::Sprint => Box::new(Sprint::default()),
        }
    }
}

pub trait GameMode: Send {
    fn kind(&self) -> ModeKind;

    /// Periodic tasks this mode runs while the session is Running
    fn tasks(&self) -> &'static [TaskKind];

    /// Mode-specific setup after the shared state has been reset
    fn reset(&mut self, _state: &mut SessionState, _ctx: &mut ModeContext<'_>) {}

    fn on_task(
        &mut self,
        task: TaskKind,
        state: &mut SessionState,
        ctx: &mut ModeContext<'_>,
    ) -> Flow;

    fn submit_input(
        &mut self,
        state: &mut SessionState,
        raw: &str,
        ctx: &mut ModeContext<'_>,
    ) -> MatchOutcome;

    /// Line of words to type and the cursor into it, for modes that have one
    fn prompt(&self) -> Option<(&[String], usize)> {
        None
    }
}

/// The arcade game: waves of words fall and cost a life when they land
#[derive(Debug, Clone, Copy, Default)]
pub struct FallingWords;

impl GameMode for FallingWords {
    fn kind(&self) -> ModeKind {
        ModeKind::Falling
    }

    fn tasks(&self) -> &'static [TaskKind] {
        &[TaskKind::Clock, TaskKind::Spawn, TaskKind::Motion]
    }

    fn on_task(
        &mut self,
        task: TaskKind,
        state: &mut SessionState,
        ctx: &mut ModeContext<'_>,
    ) -> Flow {
        match task {
            TaskKind::Clock => {
                state.elapsed_secs += 1;
            }
            TaskKind::Spawn => {
                let batch = wave::spawn(state, ctx.viewport.width, ctx.words, &mut *ctx.rng);
                state.active_words.extend(batch);
            }
            TaskKind::Motion => {
                let report = motion::advance(state, ctx.viewport.height);
                if report.depleted {
                    return Flow::Finished;
                }
            }
        }
        Flow::Continue
    }

    fn submit_input(
        &mut self,
        state: &mut SessionState,
        raw: &str,
        _ctx: &mut ModeContext<'_>,
    ) -> MatchOutcome {
        score::submit_input(state, raw)
    }
}

/// Timed test: type the current word and a space to advance
#[derive(Debug, Clone, Default)]
pub struct Sprint {
    line: Vec<String>,
    cursor: usize,
}

impl Sprint {
    fn refill(&mut self, ctx: &mut ModeContext<'_>) {
        self.line = ctx.words.shuffled(SPRINT_LINE_WORDS, &mut *ctx.rng);
        self.cursor = 0;
    }

    pub fn current(&self) -> Option<&str> {
        self.line.get(self.cursor).map(String::as_str)
    }
}

impl GameMode for Sprint {
    fn kind(&self) -> ModeKind {
        ModeKind::Sprint
    }

    fn tasks(&self) -> &'static [TaskKind] {
        &[TaskKind::Clock]
    }

    fn reset(&mut self, _state: &mut SessionState, ctx: &mut ModeContext<'_>) {
        self.refill(ctx);
    }

    fn on_task(
        &mut self,
        task: TaskKind,
        state: &mut SessionState,
        _ctx: &mut ModeContext<'_>,
    ) -> Flow {
        if task != TaskKind::Clock {
            return Flow::Continue;
        }
        state.elapsed_secs += 1;
        if state.elapsed_secs >= SPRINT_SECS {
            state.wpm = score::wpm(state.total_chars_typed, state.elapsed_secs);
            return Flow::Finished;
        }
        Flow::Continue
    }

    fn submit_input(
        &mut self,
        state: &mut SessionState,
        raw: &str,
        ctx: &mut ModeContext<'_>,
    ) -> MatchOutcome {
        if !raw.ends_with(' ') {
            state.input = raw.to_string();
            return MatchOutcome::NoMatch;
        }
        state.input.clear();

        let typed = score::normalize(raw);
        let Some(current) = self.current().map(str::to_string) else {
            return MatchOutcome::NoMatch;
        };
        if typed != score::normalize(&current) {
            return MatchOutcome::NoMatch;
        }

        // the word plus the space that committed it
        score::record(state, current.chars().count() + 1);
        self.cursor += 1;
        if self.cursor >= self.line.len() {
            self.refill(ctx);
        }
        MatchOutcome::Matched { text: current }
    }

    fn prompt(&self) -> Option<(&[String], usize)> {
        Some((&self.line, self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FallingWord, MAX_LIVES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx<'a>(words: &'a WordSource, rng: &'a mut StdRng) -> ModeContext<'a> {
        ModeContext {
            words,
            viewport: Viewport::default(),
            rng,
        }
    }

    #[test]
    fn mode_kind_builds_matching_strategy() {
        assert_eq!(ModeKind::Falling.build().kind(), ModeKind::Falling);
        assert_eq!(ModeKind::Sprint.build().kind(), ModeKind::Sprint);
        assert_eq!(ModeKind::Sprint.to_string(), "sprint");
    }

    #[test]
    fn falling_clock_spawn_motion() {
        let words = WordSource::new(["elma"]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = ctx(&words, &mut rng);
        let mut mode = FallingWords;
        let mut state = SessionState::default();

        assert_eq!(mode.on_task(TaskKind::Clock, &mut state, &mut ctx), Flow::Continue);
        assert_eq!(state.elapsed_secs, 1);

        mode.on_task(TaskKind::Spawn, &mut state, &mut ctx);
        assert_eq!(state.active_words.len(), 1);

        mode.on_task(TaskKind::Motion, &mut state, &mut ctx);
        assert!(state.active_words[0].top > 0.0);
    }

    #[test]
    fn falling_finishes_when_last_life_lost() {
        let words = WordSource::new(["elma"]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = ctx(&words, &mut rng);
        let mut word = FallingWord::new("elma", 0.0, 1.0);
        word.top = 570.0;
        let mut state = SessionState {
            lives: 1,
            active_words: vec![word],
            ..Default::default()
        };
        assert_eq!(
            FallingWords.on_task(TaskKind::Motion, &mut state, &mut ctx),
            Flow::Finished
        );
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn sprint_advances_on_space_commit() {
        let words = WordSource::new(["kedi", "köpek", "kuş"]);
        let mut rng = StdRng::seed_from_u64(8);
        let mut ctx = ctx(&words, &mut rng);
        let mut mode = Sprint::default();
        let mut state = SessionState::default();
        mode.reset(&mut state, &mut ctx);

        let first = mode.current().unwrap().to_string();
        assert_eq!(
            mode.submit_input(&mut state, &first, &mut ctx),
            MatchOutcome::NoMatch
        );
        assert_eq!(state.input, first);

        let committed = format!("{first} ");
        assert_eq!(
            mode.submit_input(&mut state, &committed, &mut ctx),
            MatchOutcome::Matched {
                text: first.clone()
            }
        );
        assert_eq!(state.total_chars_typed, first.chars().count() + 1);
        assert!(state.input.is_empty());
        assert_eq!(mode.prompt().unwrap().1, 1);
    }

    #[test]
    fn sprint_wrong_word_clears_buffer_without_advancing() {
        let words = WordSource::new(["kedi", "köpek"]);
        let mut rng = StdRng::seed_from_u64(8);
        let mut ctx = ctx(&words, &mut rng);
        let mut mode = Sprint::default();
        let mut state = SessionState::default();
        mode.reset(&mut state, &mut ctx);

        assert_eq!(
            mode.submit_input(&mut state, "yanlış ", &mut ctx),
            MatchOutcome::NoMatch
        );
        assert!(state.input.is_empty());
        assert_eq!(mode.prompt().unwrap().1, 0);
        assert_eq!(state.total_chars_typed, 0);
    }

    #[test]
    fn sprint_refills_exhausted_line() {
        let words = WordSource::new(["bir", "iki"]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = ctx(&words, &mut rng);
        let mut mode = Sprint::default();
        let mut state = SessionState::default();
        mode.reset(&mut state, &mut ctx);

        for _ in 0..2 {
            let w = format!("{} ", mode.current().unwrap());
            mode.submit_input(&mut state, &w, &mut ctx);
        }
        let (line, cursor) = mode.prompt().unwrap();
        assert_eq!(cursor, 0);
        assert_eq!(line.len(), 2);
        assert_eq!(state.total_chars_typed, 8);
    }

    #[test]
    fn sprint_ends_after_sixty_seconds_and_keeps_lives() {
        let words = WordSource::new(["bir"]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = ctx(&words, &mut rng);
        let mut mode = Sprint::default();
        let mut state = SessionState {
            total_chars_typed: 100,
            ..Default::default()
        };
        for _ in 1..SPRINT_SECS {
            assert_eq!(mode.on_task(TaskKind::Clock, &mut state, &mut ctx), Flow::Continue);
        }
        assert_eq!(mode.on_task(TaskKind::Clock, &mut state, &mut ctx), Flow::Finished);
        assert_eq!(state.wpm, 20);
        assert_eq!(state.lives, MAX_LIVES);
    }

    #[test]
    fn sprint_with_empty_source_never_matches() {
        let words = WordSource::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = ctx(&words, &mut rng);
        let mut mode = Sprint::default();
        let mut state = SessionState::default();
        mode.reset(&mut state, &mut ctx);
        assert_eq!(
            mode.submit_input(&mut state, "bir ", &mut ctx),
            MatchOutcome::NoMatch
        );
    }
}
