// Library surface for the TUI binary and headless/integration tests.
// Keep this free of rendering code; ui lives with main.rs.
pub mod app_dirs;
pub mod bank;
pub mod card;
pub mod celebration;
pub mod config;
pub mod controls;
pub mod countdown;
pub mod deck;
pub mod error;
pub mod logging;
pub mod quiz;
pub mod runtime;
pub mod session;
pub mod shame;

pub use error::QuizError;
pub use quiz::{Quiz, QuizEvent, QuizView, Transition};
