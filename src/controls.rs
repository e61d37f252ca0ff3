use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::card::Reveal;
use crate::quiz::{Quiz, Transition};
use crate::session::{Phase, RevealMode};

pub const GRID_COLUMNS: usize = 3;

/// Seconds added or removed per `+`/`-` press on the preview screen.
pub const DURATION_STEP: i64 = 5;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    NewSession,
}

/// Single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn masked(&self) -> String {
        "*".repeat(self.value.chars().count())
    }
}

/// Keyboard state that lives outside the quiz: text fields and the grid cursor.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    cursor: usize,
    password: TextField,
    name: TextField,
    naming: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn password(&self) -> &TextField {
        &self.password
    }

    pub fn name(&self) -> &TextField {
        &self.name
    }

    /// True while the shame-name prompt has focus.
    pub fn is_naming(&self) -> bool {
        self.naming
    }

    pub fn on_key(&mut self, key: KeyEvent, quiz: &mut Quiz) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match quiz.phase() {
            Phase::Auth => self.on_auth_key(key, quiz),
            Phase::Preview => self.on_preview_key(key, quiz),
            Phase::Game => {
                if quiz.overlay().is_none() {
                    self.close_name_prompt();
                }
                if self.naming {
                    self.on_name_key(key, quiz)
                } else if let Some(reveal) = quiz.overlay() {
                    self.on_overlay_key(key, reveal, quiz)
                } else {
                    self.on_grid_key(key, quiz)
                }
            }
        }
    }

    fn on_auth_key(&mut self, key: KeyEvent, quiz: &mut Quiz) -> Flow {
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Enter => {
                let _ = quiz.submit_password(self.password.value());
                self.password.clear();
            }
            KeyCode::Backspace => self.password.pop(),
            KeyCode::Char(c) => self.password.push(c),
            _ => {}
        }
        Flow::Continue
    }

    fn on_preview_key(&mut self, key: KeyEvent, quiz: &mut Quiz) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('s') => {
                quiz.start_timer();
            }
            KeyCode::Char('p') => {
                quiz.pause_timer();
            }
            KeyCode::Char(' ') => {
                if quiz.countdown().is_running() {
                    quiz.pause_timer();
                } else {
                    quiz.start_timer();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let secs = i64::from(quiz.countdown().duration()) + DURATION_STEP;
                let _ = quiz.set_preview_duration(secs);
            }
            KeyCode::Char('-') => {
                let secs = i64::from(quiz.countdown().duration()) - DURATION_STEP;
                let _ = quiz.set_preview_duration(secs);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_overlay_key(&mut self, key: KeyEvent, reveal: Reveal, quiz: &mut Quiz) -> Flow {
        let two_step = quiz.options().reveal == RevealMode::TwoStep;
        match key.code {
            KeyCode::Esc => {
                quiz.dismiss_overlay();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if two_step && reveal == Reveal::Answer {
                    quiz.finalize_card();
                } else {
                    quiz.reveal_answer();
                }
            }
            KeyCode::Char('a') => {
                quiz.reveal_answer();
            }
            KeyCode::Char('d') if two_step => {
                quiz.finalize_card();
            }
            KeyCode::Char('c') if quiz.options().wall_of_shame => {
                self.naming = true;
                self.name.clear();
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_name_key(&mut self, key: KeyEvent, quiz: &mut Quiz) -> Flow {
        match key.code {
            KeyCode::Esc => {
                quiz.clear_error();
                self.close_name_prompt();
            }
            KeyCode::Enter => {
                if let Ok(Transition::Changed) = quiz.record_shame(self.name.value()) {
                    self.close_name_prompt();
                }
            }
            KeyCode::Backspace => self.name.pop(),
            KeyCode::Char(c) => self.name.push(c),
            _ => {}
        }
        Flow::Continue
    }

    fn on_grid_key(&mut self, key: KeyEvent, quiz: &mut Quiz) -> Flow {
        let len = quiz.cards().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('n') if quiz.is_complete() => return Flow::NewSession,
            KeyCode::Left | KeyCode::Char('h') => {
                if self.cursor % GRID_COLUMNS > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.cursor % GRID_COLUMNS < GRID_COLUMNS - 1 && self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor >= GRID_COLUMNS {
                    self.cursor -= GRID_COLUMNS;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + GRID_COLUMNS < len {
                    self.cursor += GRID_COLUMNS;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                quiz.select_card(self.cursor);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if index < len {
                    self.cursor = index;
                    quiz.select_card(index);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn close_name_prompt(&mut self) {
        self.naming = false;
        self.name.clear();
    }
}
