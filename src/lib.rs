// Library surface for the game core, headless integration tests and the binary.
pub mod app_dirs;
pub mod config;
pub mod game;
pub mod lives;
pub mod mode;
pub mod motion;
pub mod placement;
pub mod runtime;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod ui;
pub mod viewport;
pub mod wave;
pub mod words;

pub use game::Game;
pub use mode::ModeKind;
pub use session::{FallingWord, Phase, SessionState};
