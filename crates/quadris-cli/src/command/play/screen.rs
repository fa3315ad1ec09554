use crossterm::event::{Event, KeyCode};
use quadris_engine::{GameConfig, Seed};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    input,
    session::{GameSession, SessionState},
    view::SessionDisplay,
};

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(config: GameConfig, seed: Option<Seed>, fps: u64, gravity_ms: u64) -> Self {
        Self {
            session: GameSession::new(config, seed, fps, gravity_ms),
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session);
        let help_text = match self.session.state() {
            SessionState::Playing => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ Z (Rotate) | Space (Drop) | P (Pause) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::GameOver => "Controls: Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('q') => self.is_exiting = true,
                KeyCode::Char('p') => self.session.toggle_pause(),
                code => {
                    if let Some(input) = input::map_key(code) {
                        self.session.apply(input);
                    }
                }
            }
        }
    }

    pub fn update(&mut self) {
        self.session.on_tick();
    }
}
