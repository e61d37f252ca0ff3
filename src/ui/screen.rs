use flipquiz::session::Phase;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    ui::{render_auth, render_game, render_preview},
    App,
};

/// A UI Screen boundary: one per session phase
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Password gate
pub struct AuthScreen;

impl Screen for AuthScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_auth(app, area, buf);
    }
}

/// Timed look at every question before the game starts
pub struct PreviewScreen;

impl Screen for PreviewScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_preview(app, area, buf);
    }
}

/// Card grid, overlay, and wall of shame
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_game(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Auth => Box::new(AuthScreen),
        Phase::Preview => Box::new(PreviewScreen),
        Phase::Game => Box::new(GameScreen),
    }
}
