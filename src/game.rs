//! Session state machine: Idle -> Running -> GameOver, plus the periodic
//! tasks that only exist while Running.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::mode::{Flow, GameMode, ModeContext, ModeKind};
use crate::scheduler::{Fired, Scheduler};
use crate::score::MatchOutcome;
use crate::session::{Phase, SessionState};
use crate::viewport::Viewport;
use crate::words::WordSource;

pub struct Game {
    state: SessionState,
    scheduler: Scheduler,
    mode: Box<dyn GameMode>,
    words: WordSource,
    viewport: Viewport,
    rng: StdRng,
}

impl Game {
    pub fn new(kind: ModeKind, words: WordSource, viewport: Viewport, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: SessionState::default(),
            scheduler: Scheduler::new(),
            mode: kind.build(),
            words,
            viewport,
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn mode(&self) -> &dyn GameMode {
        &*self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Any phase -> Running with fresh counters
    pub fn start(&mut self) {
        // cancel first so nothing armed under the old generation survives the reset
        self.scheduler.cancel_all();
        self.state.reset();

        let mut ctx = ModeContext {
            words: &self.words,
            viewport: self.viewport,
            rng: &mut self.rng,
        };
        self.mode.reset(&mut self.state, &mut ctx);

        self.state.phase = Phase::Running;
        self.scheduler.arm(self.mode.tasks());
        log::info!("{} session started", self.mode.kind());
    }

    /// GameOver -> Running; same effect as `start`
    pub fn restart(&mut self) {
        self.start();
    }

    /// Host lost visibility: Running -> Idle, progress is discarded
    pub fn pause(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }
        self.scheduler.cancel_all();
        self.state.phase = Phase::Idle;
        log::info!("session paused at {}s", self.state.elapsed_secs);
    }

    /// Switch variant; takes effect from the next `start`
    pub fn set_mode(&mut self, kind: ModeKind) {
        if self.state.phase == Phase::Running {
            self.pause();
        }
        self.mode = kind.build();
    }

    /// New field dimensions apply from the next tick; words in flight stay put
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Run every task due within the next `dt`, one at a time in schedule order
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(fired) = self.scheduler.poll(until) {
            self.run_task(fired);
        }
        self.scheduler.settle(until);
    }

    /// Apply a single firing. Stale firings (issued before a reset) are dropped.
    pub fn run_task(&mut self, fired: Fired) -> bool {
        if fired.generation != self.scheduler.generation() || self.state.phase != Phase::Running {
            log::trace!("dropping stale {} tick", fired.kind);
            return false;
        }

        let mut ctx = ModeContext {
            words: &self.words,
            viewport: self.viewport,
            rng: &mut self.rng,
        };
        if self.mode.on_task(fired.kind, &mut self.state, &mut ctx) == Flow::Finished {
            self.game_over();
        }
        true
    }

    pub fn submit_input(&mut self, raw: &str) -> MatchOutcome {
        if self.state.phase != Phase::Running {
            return MatchOutcome::Ignored;
        }
        let mut ctx = ModeContext {
            words: &self.words,
            viewport: self.viewport,
            rng: &mut self.rng,
        };
        self.mode.submit_input(&mut self.state, raw, &mut ctx)
    }

    /// Time until the next periodic task is due, if any is armed
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.scheduler.until_next()
    }

    fn game_over(&mut self) {
        self.scheduler.cancel_all();
        self.state.phase = Phase::GameOver;
        log::info!(
            "game over after {}s, {} wpm",
            self.state.elapsed_secs,
            self.state.wpm
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TaskKind;
    use crate::session::{FallingWord, MAX_LIVES};
    use assert_matches::assert_matches;

    fn game(kind: ModeKind) -> Game {
        Game::new(
            kind,
            WordSource::new(["elma", "armut", "kiraz"]),
            Viewport::default(),
            Some(42),
        )
    }

    #[test]
    fn new_game_is_idle_without_tasks() {
        let g = game(ModeKind::Falling);
        assert_eq!(g.phase(), Phase::Idle);
        assert!(g.scheduler().is_idle());
    }

    #[test]
    fn start_arms_mode_tasks() {
        let mut g = game(ModeKind::Falling);
        g.start();
        assert_eq!(g.phase(), Phase::Running);
        assert_eq!(g.state().lives, MAX_LIVES);
        for kind in [TaskKind::Clock, TaskKind::Spawn, TaskKind::Motion] {
            assert!(g.scheduler().is_armed(kind));
        }

        let mut s = game(ModeKind::Sprint);
        s.start();
        assert!(s.scheduler().is_armed(TaskKind::Clock));
        assert!(!s.scheduler().is_armed(TaskKind::Motion));
    }

    #[test]
    fn idle_game_ignores_time_and_input() {
        let mut g = game(ModeKind::Falling);
        g.advance(Duration::from_secs(5));
        assert_eq!(g.state().elapsed_secs, 0);
        assert!(g.state().active_words.is_empty());
        assert_eq!(g.submit_input("elma"), MatchOutcome::Ignored);
    }

    #[test]
    fn first_second_spawns_after_clock() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.advance(Duration::from_millis(999));
        assert_eq!(g.state().elapsed_secs, 0);
        assert!(g.state().active_words.is_empty());
        g.advance(Duration::from_millis(1));
        assert_eq!(g.state().elapsed_secs, 1);
        assert_eq!(g.state().active_words.len(), 1);
    }

    #[test]
    fn stale_tick_is_dropped_after_restart() {
        let mut g = game(ModeKind::Falling);
        g.start();
        let old_gen = g.scheduler().generation();
        g.restart();
        let stale = Fired {
            kind: TaskKind::Clock,
            at: Duration::from_secs(1),
            generation: old_gen,
        };
        assert!(!g.run_task(stale));
        assert_eq!(g.state().elapsed_secs, 0);
    }

    #[test]
    fn pause_stops_everything() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.advance(Duration::from_secs(3));
        g.pause();
        assert_eq!(g.phase(), Phase::Idle);
        assert!(g.scheduler().is_idle());
        let elapsed = g.state().elapsed_secs;
        g.advance(Duration::from_secs(10));
        assert_eq!(g.state().elapsed_secs, elapsed);
    }

    #[test]
    fn pause_outside_running_is_a_no_op() {
        let mut g = game(ModeKind::Falling);
        g.pause();
        assert_eq!(g.phase(), Phase::Idle);
    }

    #[test]
    fn losing_last_life_ends_session_within_the_tick() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.state.lives = 1;
        let mut w = FallingWord::new("elma", 0.0, 5.0);
        w.top = 570.0;
        g.state.active_words.push(w);

        g.advance(Duration::from_millis(50));
        assert_eq!(g.state().lives, 0);
        assert_eq!(g.phase(), Phase::GameOver);
        assert!(g.scheduler().is_idle());
    }

    #[test]
    fn input_matches_active_word() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.advance(Duration::from_secs(1));
        let text = g.state().active_words[0].text.clone();
        assert_matches!(g.submit_input(&text), MatchOutcome::Matched { .. });
        assert!(g.state().active_words.is_empty());
        assert_eq!(g.state().total_chars_typed, text.chars().count());
    }

    #[test]
    fn resize_applies_to_next_spawn() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.resize(Viewport::new(40.0, 600.0));
        g.advance(Duration::from_secs(1));
        // every word is wider than the field, so it is pinned to the left edge
        assert!(g.state().active_words.iter().all(|w| w.left == 0.0));
    }

    #[test]
    fn set_mode_pauses_running_session() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.set_mode(ModeKind::Sprint);
        assert_eq!(g.phase(), Phase::Idle);
        assert_eq!(g.mode().kind(), ModeKind::Sprint);
    }

    #[test]
    fn until_next_tick_tracks_motion_cadence() {
        let mut g = game(ModeKind::Falling);
        assert_eq!(g.until_next_tick(), None);
        g.start();
        assert_eq!(g.until_next_tick(), Some(Duration::from_millis(50)));
        g.advance(Duration::from_millis(20));
        assert_eq!(g.until_next_tick(), Some(Duration::from_millis(30)));
    }
}
