use quadris_engine::{Game, GameConfig, GameStats, Input, Seed};

/// Driver-side lifecycle of one game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Wraps the engine with the concerns it deliberately leaves to the driver:
/// the gravity cadence, pause, and the game-over latch.
///
/// The engine has no timer. This session counts render-loop frames and
/// feeds a synthetic [`Input::Down`] whenever the gravity interval elapses,
/// exactly as if the player had pressed it.
#[derive(Debug)]
pub struct GameSession {
    game: Game,
    state: SessionState,
    gravity_frames: u64,
    frames_until_gravity: u64,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: Option<Seed>, fps: u64, gravity_ms: u64) -> Self {
        let game = match seed {
            Some(seed) => Game::with_seed(config, seed),
            None => Game::new(config),
        };
        let gravity_frames = (gravity_ms * fps / 1000).max(1);
        Self {
            game,
            state: SessionState::Playing,
            gravity_frames,
            frames_until_gravity: gravity_frames,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stats(&self) -> &GameStats {
        self.game.stats()
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            // No way back from game over
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Feeds one player input to the engine.
    pub fn apply(&mut self, input: Input) {
        if !self.state.is_playing() {
            return;
        }
        self.game.advance(input);
        self.sync_over();
    }

    /// Advances the gravity clock by one frame, issuing a synthetic `Down`
    /// when the interval elapses.
    pub fn on_tick(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.frames_until_gravity -= 1;
        if self.frames_until_gravity == 0 {
            self.frames_until_gravity = self.gravity_frames;
            self.game.advance(Input::Down);
            self.sync_over();
        }
    }

    fn sync_over(&mut self) {
        if self.game.is_over() {
            self.state = SessionState::GameOver;
        }
    }
}
