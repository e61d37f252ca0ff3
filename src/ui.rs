pub mod screen;

use flipquiz::{
    card::{Card, Reveal, Stage},
    celebration::Celebration,
    controls::GRID_COLUMNS,
    session::RevealMode,
};
use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;
use screen::Screen;

const TITLE: &str = "Flip & Quiz";
const SHAME_PANEL_WIDTH: u16 = 32;

const CARD_COLORS: [Color; 9] = [
    Color::Magenta,
    Color::LightRed,
    Color::LightGreen,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::LightMagenta,
    Color::Red,
    Color::Yellow,
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.quiz.phase()).render(self, area, buf);

        if self.celebration.is_active() {
            render_celebration(&self.celebration, area, buf);
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn label(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.to_uppercase(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn error_line(app: &App) -> Option<Line<'static>> {
    app.quiz.error().map(|err| {
        Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    })
}

/// Rect of `percent_x` by `percent_y` of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_auth(app: &App, area: Rect, buf: &mut Buffer) {
    let rect = centered_rect(60, 50, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {TITLE} "))
        .title_alignment(Alignment::Center);
    let inner = block.inner(rect);
    block.render(rect, buf);

    let mut lines = vec![
        Line::from("Enter the password to unlock the quiz."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Password: ", bold()),
            Span::raw(app.controls.password().masked()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
    ];
    if let Some(line) = error_line(app) {
        lines.push(line);
    }
    if app.fallback_secret {
        lines.push(Line::from(Span::styled(
            "warning: the built-in default password is in use, set FLIPQUIZ_PASSWORD",
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(enter) unlock / (esc) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

pub fn render_preview(app: &App, area: Rect, buf: &mut Buffer) {
    let view = app.quiz.view();
    let countdown = app.quiz.countdown();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints([
            Constraint::Length(3), // timer
            Constraint::Min(0),    // questions
            Constraint::Length(1), // error
            Constraint::Length(1), // legend
        ])
        .split(area);

    let state = if view.preview_running {
        Span::styled("running", Style::default().fg(Color::Green))
    } else {
        Span::styled("paused", Style::default().fg(Color::Yellow))
    };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{}s left", view.remaining_secs), bold()),
        Span::raw("  "),
        state,
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {TITLE}: preview ")),
    )
    .render(chunks[0], buf);

    let questions = view
        .cards
        .iter()
        .map(|card| {
            Line::from(vec![
                Span::styled(format!("{:>2}. ", card.id()), Style::default().fg(Color::Cyan)),
                Span::raw(card.question().to_string()),
            ])
        })
        .collect_vec();
    Paragraph::new(questions)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    if let Some(line) = error_line(app) {
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }

    let duration_hint = format!("(+/-) duration {}s", countdown.duration());
    let mut legend = vec!["(s)tart", "(p)ause"];
    if !countdown.has_started() {
        legend.push(&duration_hint);
    }
    legend.push("(q)uit");
    Paragraph::new(Span::styled(
        legend.join(" / "),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[3], buf);
}

pub fn render_game(app: &App, area: Rect, buf: &mut Buffer) {
    let view = app.quiz.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),    // grid + wall
            Constraint::Length(1), // footer
        ])
        .split(area);

    let counter = format!("Cards left: {}/{}", view.cards_remaining, view.cards.len());
    let pad = usize::from(chunks[0].width).saturating_sub(TITLE.width() + counter.width());
    Paragraph::new(Line::from(vec![
        Span::styled(TITLE, bold().fg(Color::Cyan)),
        Span::raw(" ".repeat(pad)),
        Span::styled(counter, bold()),
    ]))
    .render(chunks[0], buf);

    let body = if app.quiz.options().wall_of_shame {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SHAME_PANEL_WIDTH)])
            .split(chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0)])
            .split(chunks[1])
    };

    render_grid(app, body[0], buf);
    if body.len() > 1 {
        render_wall(app, body[1], buf);
    }

    let footer = if app.quiz.is_complete() {
        "All cards answered! 🎉  (n)ew session / (q)uit"
    } else {
        "Select a card to reveal a question.  arrows move / enter flips / 1-9 pick / (q)uit"
    };
    Paragraph::new(Span::styled(footer, Style::default().add_modifier(Modifier::ITALIC)))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    render_overlay(app, area, buf);
}

fn render_grid(app: &App, area: Rect, buf: &mut Buffer) {
    let cards = app.quiz.cards();
    let row_count = cards.len().div_ceil(GRID_COLUMNS).max(1);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(area);

    for (row, chunk) in cards.iter().enumerate().chunks(GRID_COLUMNS).into_iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(rows[row]);

        for (col, (index, card)) in chunk.enumerate() {
            render_card(card, index == app.controls.cursor(), index, cells[col], buf);
        }
    }
}

fn render_card(card: &Card, selected: bool, index: usize, area: Rect, buf: &mut Buffer) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if card.is_answered() {
        dim
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    let color = CARD_COLORS[index % CARD_COLORS.len()];
    let mut lines = vec![Line::from(""); usize::from(inner.height.saturating_sub(2) / 2)];
    match card.stage() {
        Stage::Initial => {
            lines.push(Line::from(Span::styled(
                card.id().to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        Stage::Question(_) => {
            lines.clear();
            lines.push(label("Question", Color::Cyan));
            lines.push(Line::from(card.question().to_string()));
        }
        Stage::Answered => {
            lines.clear();
            lines.push(label("Answer", Color::DarkGray));
            lines.push(Line::from(Span::styled(card.answer().to_string(), dim)));
        }
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

fn render_wall(app: &App, area: Rect, buf: &mut Buffer) {
    let entries = app.quiz.shame_log();
    let lines = if entries.is_empty() {
        vec![Line::from(Span::styled(
            "Nobody yet.",
            Style::default().add_modifier(Modifier::ITALIC),
        ))]
    } else {
        entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(entry.name.clone(), bold().fg(Color::Red)),
                    Span::raw(": "),
                    Span::styled(
                        entry.question.clone(),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ])
            })
            .collect_vec()
    };

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Wall of Shame "),
        )
        .render(area, buf);
}

fn render_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let view = app.quiz.view();
    let (Some(index), Some(reveal)) = (view.active_card, view.overlay) else {
        return;
    };
    let card = &view.cards[index];
    let shame = app.quiz.options().wall_of_shame;

    let rect = centered_rect(70, 60, area);
    Clear.render(rect, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Card {} ", card.id()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(rect);
    block.render(rect, buf);

    let mut lines = vec![
        label("Question", Color::Cyan),
        Line::from(Span::styled(card.question().to_string(), bold())),
        Line::from(""),
    ];
    if reveal == Reveal::Answer {
        lines.push(label("Answer", Color::Green));
        lines.push(Line::from(card.answer().to_string()));
        lines.push(Line::from(""));
    }

    if app.controls.is_naming() {
        lines.push(Line::from(vec![
            Span::styled("Name: ", bold()),
            Span::raw(app.controls.name().value().to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]));
        lines.push(Line::from(Span::styled(
            "(enter) add to the wall of shame / (esc) back",
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    } else {
        let mut legend = Vec::new();
        match (reveal, app.quiz.options().reveal) {
            (Reveal::Prompt, _) => legend.push("(a) Show Answer"),
            (Reveal::Answer, RevealMode::TwoStep) => legend.push("(d) Done"),
            (Reveal::Answer, RevealMode::SingleStep) => {}
        }
        if shame {
            legend.push("(c) Can't Answer");
        }
        legend.push("(esc) close");
        lines.push(Line::from(Span::styled(
            legend.join(" / "),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    if let Some(line) = error_line(app) {
        lines.push(line);
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Render celebration particles on top of the game screen
fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let mut style = Style::default().fg(colors[particle.color_index % colors.len()]);
        if particle.is_letter() {
            style = style.add_modifier(Modifier::BOLD);
        }
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}
