/// How gravity participates in [`advance`](crate::Game::advance).
///
/// Both behaviors are legitimate readings of the classic rules, so the
/// choice is explicit instead of baked in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GravityMode {
    /// The piece descends only on explicit `Down`/`Drop` inputs. Timed
    /// falling, if wanted, is the driver's job: it interleaves synthetic
    /// `Down` inputs at its own cadence.
    #[default]
    Manual,
    /// One downward step is folded into every `advance` call, before the
    /// player's input is applied.
    AutoStep,
}

/// How the engine decides the game is over after a lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopOutRule {
    /// Over when the newly spawned piece cannot occupy its spawn cells.
    #[default]
    SpawnCollision,
    /// Over when any cell of the top row is still occupied once the lock
    /// and its line clears have resolved.
    TopRowOccupied,
}

/// Rule-variant switches for [`Game`](crate::Game).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub gravity: GravityMode,
    pub top_out: TopOutRule,
}
