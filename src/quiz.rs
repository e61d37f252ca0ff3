use rand::Rng;
use tracing::{debug, info, warn};

use crate::bank::QuestionAnswer;
use crate::card::{Card, Reveal, Stage};
use crate::countdown::{Countdown, DEFAULT_PREVIEW_SECS, MAX_PREVIEW_SECS};
use crate::deck;
use crate::error::QuizError;
use crate::session::{Phase, RevealMode, SessionOptions, MAX_CARDS};
use crate::shame::{ShameEntry, WallOfShame};

/// Discrete inputs the quiz reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    SelectCard(usize),
    RevealAnswer,
    FinalizeCard,
    RecordShame(String),
    DismissOverlay,
    SubmitPassword(String),
    StartTimer,
    PauseTimer,
    SetPreviewDuration(i64),
    /// One elapsed second of the preview countdown
    Tick,
}

/// Whether an event moved the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    /// The event was not legal in the current state and nothing happened.
    Ignored,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct QuizView<'a> {
    pub cards: &'a [Card],
    pub phase: Phase,
    pub remaining_secs: u32,
    pub preview_running: bool,
    pub shame_log: &'a [ShameEntry],
    pub active_card: Option<usize>,
    pub overlay: Option<Reveal>,
    pub cards_remaining: usize,
    pub error: Option<&'a QuizError>,
}

/// All state for one quiz session.
///
/// Every operation is total: illegal events come back as
/// [`Transition::Ignored`], validation failures as `Err` (and are kept as the
/// visible error until the next change).
#[derive(Debug, Clone)]
pub struct Quiz {
    options: SessionOptions,
    cards: Vec<Card>,
    phase: Phase,
    countdown: Countdown,
    shame: WallOfShame,
    active: Option<usize>,
    error: Option<QuizError>,
}

impl Quiz {
    /// Shuffle `bank` and deal a fresh session.
    pub fn new<R: Rng + ?Sized>(
        bank: &[QuestionAnswer],
        options: SessionOptions,
        rng: &mut R,
    ) -> Self {
        let count = options.cards.clamp(1, MAX_CARDS);
        let cards = deck::deal(bank, count, rng);
        Self::from_cards(cards, options)
    }

    /// Start a session over an already dealt deck.
    pub fn from_cards(cards: Vec<Card>, options: SessionOptions) -> Self {
        let countdown = Countdown::new(options.preview_secs.unwrap_or(DEFAULT_PREVIEW_SECS));
        let phase = options.initial_phase();
        info!(cards = cards.len(), %phase, "session started");

        Self {
            options,
            cards,
            phase,
            countdown,
            shame: WallOfShame::new(),
            active: None,
            error: None,
        }
    }

    pub fn apply(&mut self, event: QuizEvent) -> Result<Transition, QuizError> {
        let result = match event {
            QuizEvent::SelectCard(index) => Ok(self.on_select(index)),
            QuizEvent::RevealAnswer => Ok(self.on_reveal()),
            QuizEvent::FinalizeCard => Ok(self.finish_active()),
            QuizEvent::RecordShame(name) => self.on_shame(&name),
            QuizEvent::DismissOverlay => Ok(self.on_dismiss()),
            QuizEvent::SubmitPassword(value) => self.on_password(&value),
            QuizEvent::StartTimer => Ok(self.on_start()),
            QuizEvent::PauseTimer => Ok(self.on_pause()),
            QuizEvent::SetPreviewDuration(secs) => self.on_duration(secs),
            QuizEvent::Tick => Ok(self.on_tick()),
        };

        match &result {
            Ok(Transition::Changed) => self.error = None,
            Ok(Transition::Ignored) => {}
            Err(err) => self.error = Some(err.clone()),
        }
        result
    }

    pub fn select_card(&mut self, index: usize) -> Transition {
        self.apply(QuizEvent::SelectCard(index))
            .unwrap_or(Transition::Ignored)
    }

    pub fn reveal_answer(&mut self) -> Transition {
        self.apply(QuizEvent::RevealAnswer)
            .unwrap_or(Transition::Ignored)
    }

    pub fn finalize_card(&mut self) -> Transition {
        self.apply(QuizEvent::FinalizeCard)
            .unwrap_or(Transition::Ignored)
    }

    pub fn record_shame(&mut self, name: &str) -> Result<Transition, QuizError> {
        self.apply(QuizEvent::RecordShame(name.to_string()))
    }

    pub fn dismiss_overlay(&mut self) -> Transition {
        self.apply(QuizEvent::DismissOverlay)
            .unwrap_or(Transition::Ignored)
    }

    pub fn submit_password(&mut self, value: &str) -> Result<Transition, QuizError> {
        self.apply(QuizEvent::SubmitPassword(value.to_string()))
    }

    pub fn start_timer(&mut self) -> Transition {
        self.apply(QuizEvent::StartTimer)
            .unwrap_or(Transition::Ignored)
    }

    pub fn pause_timer(&mut self) -> Transition {
        self.apply(QuizEvent::PauseTimer)
            .unwrap_or(Transition::Ignored)
    }

    pub fn set_preview_duration(&mut self, secs: i64) -> Result<Transition, QuizError> {
        self.apply(QuizEvent::SetPreviewDuration(secs))
    }

    pub fn tick(&mut self) -> Transition {
        self.apply(QuizEvent::Tick).unwrap_or(Transition::Ignored)
    }

    pub fn view(&self) -> QuizView<'_> {
        QuizView {
            cards: &self.cards,
            phase: self.phase,
            remaining_secs: self.countdown.remaining(),
            preview_running: self.countdown.is_running(),
            shame_log: self.shame.entries(),
            active_card: self.active,
            overlay: self.overlay(),
            cards_remaining: self.cards_remaining(),
            error: self.error.as_ref(),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn shame_log(&self) -> &[ShameEntry] {
        self.shame.entries()
    }

    pub fn active_card(&self) -> Option<usize> {
        self.active
    }

    pub fn error(&self) -> Option<&QuizError> {
        self.error.as_ref()
    }

    /// Drop the visible error without changing anything else.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// The open card's overlay sub-step, if an overlay is open.
    pub fn overlay(&self) -> Option<Reveal> {
        let card = self.cards.get(self.active?)?;
        match card.stage() {
            Stage::Question(reveal) => Some(reveal),
            _ => None,
        }
    }

    pub fn cards_remaining(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_answered()).count()
    }

    /// Every card answered.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Game && self.cards_remaining() == 0
    }

    fn on_select(&mut self, index: usize) -> Transition {
        if self.phase != Phase::Game {
            return Transition::Ignored;
        }
        let Some(stage) = self.cards.get(index).map(Card::stage) else {
            debug!(index, "select out of range");
            return Transition::Ignored;
        };

        match stage {
            Stage::Initial => {
                // another card was dismissed mid-question and still holds the slot
                if self.cards.iter().any(|c| c.stage().is_question()) {
                    debug!(index, "select ignored, another card is still open");
                    return Transition::Ignored;
                }
                self.cards[index].open();
                self.active = Some(index);
                debug!(card = self.cards[index].id(), "card opened");
                Transition::Changed
            }
            Stage::Question(_) if self.active != Some(index) => {
                self.active = Some(index);
                debug!(card = self.cards[index].id(), "card reopened");
                Transition::Changed
            }
            Stage::Question(_) | Stage::Answered => Transition::Ignored,
        }
    }

    fn on_reveal(&mut self) -> Transition {
        let Some(index) = self.active else {
            return Transition::Ignored;
        };
        match self.options.reveal {
            RevealMode::TwoStep => {
                if self.cards[index].show_answer() {
                    debug!(card = self.cards[index].id(), "answer shown");
                    Transition::Changed
                } else {
                    Transition::Ignored
                }
            }
            RevealMode::SingleStep => self.finish_active(),
        }
    }

    fn finish_active(&mut self) -> Transition {
        let Some(index) = self.active else {
            return Transition::Ignored;
        };
        if !self.cards[index].finish() {
            return Transition::Ignored;
        }
        self.active = None;
        debug!(card = self.cards[index].id(), "card answered");

        if self.cards_remaining() == 0 {
            info!(shamed = self.shame.len(), "all cards answered");
        }
        Transition::Changed
    }

    fn on_shame(&mut self, name: &str) -> Result<Transition, QuizError> {
        if !self.options.wall_of_shame {
            return Ok(Transition::Ignored);
        }
        let Some(index) = self.active else {
            return Ok(Transition::Ignored);
        };
        if !self.cards[index].stage().is_question() {
            return Ok(Transition::Ignored);
        }

        let question = self.cards[index].question().to_string();
        match self.shame.record(name, &question) {
            Some(entry) => {
                info!(name = %entry.name, card = self.cards[index].id(), "added to the wall of shame");
                Ok(self.finish_active())
            }
            None => Err(QuizError::EmptyName),
        }
    }

    fn on_dismiss(&mut self) -> Transition {
        match self.active.take() {
            Some(index) => {
                debug!(card = self.cards[index].id(), "overlay dismissed");
                Transition::Changed
            }
            None => Transition::Ignored,
        }
    }

    fn on_password(&mut self, value: &str) -> Result<Transition, QuizError> {
        if self.phase != Phase::Auth {
            return Ok(Transition::Ignored);
        }
        if self.options.secret.as_deref() != Some(value) {
            warn!("wrong password submitted");
            return Err(QuizError::WrongPassword);
        }

        self.countdown.reset();
        self.phase = self.options.phase_after_auth();
        info!(phase = %self.phase, "password accepted");
        Ok(Transition::Changed)
    }

    fn on_start(&mut self) -> Transition {
        if self.phase == Phase::Preview && self.countdown.start() {
            info!(remaining = self.countdown.remaining(), "preview timer started");
            Transition::Changed
        } else {
            Transition::Ignored
        }
    }

    fn on_pause(&mut self) -> Transition {
        if self.phase == Phase::Preview && self.countdown.pause() {
            info!(remaining = self.countdown.remaining(), "preview timer paused");
            Transition::Changed
        } else {
            Transition::Ignored
        }
    }

    fn on_duration(&mut self, secs: i64) -> Result<Transition, QuizError> {
        if self.options.preview_secs.is_none()
            || self.phase == Phase::Game
            || self.countdown.has_started()
        {
            return Ok(Transition::Ignored);
        }
        if secs < 1 {
            return Err(QuizError::InvalidDuration(secs));
        }

        let secs = u32::try_from(secs)
            .unwrap_or(MAX_PREVIEW_SECS)
            .min(MAX_PREVIEW_SECS);
        if !self.countdown.set_duration(secs) {
            return Ok(Transition::Ignored);
        }
        self.options.preview_secs = Some(self.countdown.duration());
        debug!(secs, "preview duration set");
        Ok(Transition::Changed)
    }

    fn on_tick(&mut self) -> Transition {
        if self.phase != Phase::Preview || !self.countdown.is_running() {
            return Transition::Ignored;
        }
        if self.countdown.tick() {
            self.phase = Phase::Game;
            info!("preview over, game on");
        }
        Transition::Changed
    }
}

/// Pure form of [`Quiz::apply`]: consume a state, return the next one.
pub fn transition(mut state: Quiz, event: QuizEvent) -> Quiz {
    let _ = state.apply(event);
    state
}
