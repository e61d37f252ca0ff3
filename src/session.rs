use serde::{Deserialize, Serialize};

use crate::countdown::DEFAULT_PREVIEW_SECS;

pub const DEFAULT_CARDS: usize = 12;
pub const MAX_CARDS: usize = 24;

/// Where the session is. Only ever advances Auth -> Preview -> Game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Auth,
    Preview,
    Game,
}

/// How many steps it takes to finish an opened card.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RevealMode {
    /// "Show Answer" answers the card straight away
    SingleStep,
    /// "Show Answer" reveals inside the overlay, "Done" finishes the card
    #[default]
    TwoStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub cards: usize,
    pub reveal: RevealMode,
    /// None skips the preview phase entirely
    pub preview_secs: Option<u32>,
    pub wall_of_shame: bool,
    /// None skips the password gate
    pub secret: Option<String>,
}

impl SessionOptions {
    pub fn initial_phase(&self) -> Phase {
        if self.secret.is_some() {
            Phase::Auth
        } else {
            self.phase_after_auth()
        }
    }

    pub fn phase_after_auth(&self) -> Phase {
        if self.preview_secs.is_some() {
            Phase::Preview
        } else {
            Phase::Game
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            cards: DEFAULT_CARDS,
            reveal: RevealMode::default(),
            preview_secs: Some(DEFAULT_PREVIEW_SECS),
            wall_of_shame: true,
            secret: None,
        }
    }
}
