use crossterm::event::Event;
use quadris_engine::{GameConfig, Seed};
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, RenderMode, Tui},
};

const FPS: u64 = 60;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(config: GameConfig, seed: Option<Seed>, gravity_ms: u64) -> Self {
        Self {
            screen: PlayScreen::new(config, seed, FPS, gravity_ms),
        }
    }
}

impl App for PlayApp {
    #[expect(clippy::cast_precision_loss)]
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(FPS as f64);
        tui.set_render_mode(RenderMode::throttled_from_rate(FPS as f64));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update();
    }
}
