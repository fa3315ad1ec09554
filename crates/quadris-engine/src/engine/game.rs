use std::fmt;

use rand::Rng as _;

use crate::{
    core::{
        board::{BOARD_HEIGHT, BOARD_WIDTH, Board},
        piece::Piece,
    },
    engine::{
        config::{GameConfig, GravityMode, TopOutRule},
        game_stats::GameStats,
        piece_generator::{PieceGenerator, Seed},
    },
};

/// A single player-directed action fed to [`Game::advance`].
///
/// This is the whole input surface: unrecognized keys must be dropped by
/// the driver, not forwarded as some no-op variant, because every call to
/// `advance` counts as a turn and ends in a lock check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move the piece one column left.
    Left,
    /// Move the piece one column right.
    Right,
    /// Move the piece one row down.
    Down,
    /// Rotate the piece one step clockwise, or leave it as is.
    Rotate,
    /// Drop the piece straight down until it rests.
    Drop,
}

/// The game state machine.
///
/// Owns the board, the falling piece, the score, and the one-way over
/// flag. Every operation is a synchronous, atomic state transformation:
/// a rejected move changes nothing, an accepted one commits entirely.
///
/// The falling piece is only ever mutated through placement-checked
/// commits, so its occupied cells never overlap a filled cell and never
/// leave the board.
///
/// # Example
///
/// ```
/// use quadris_engine::{Game, GameConfig, Input};
///
/// let mut game = Game::new(GameConfig::default());
/// game.advance(Input::Rotate);
/// game.advance(Input::Drop);
/// assert!(!game.is_over());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    falling_piece: Piece,
    stats: GameStats,
    over: bool,
    generator: PieceGenerator,
    config: GameConfig,
}

impl Game {
    /// Starts a game with a random piece sequence.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Starts a game with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: Seed) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let falling_piece = Piece::spawn(generator.next_piece());
        Self {
            board: Board::EMPTY,
            falling_piece,
            stats: GameStats::new(),
            over: false,
            generator,
            config,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Replaces the falling piece if the game is still running and the
    /// replacement placement is valid.
    ///
    /// Returns whether the replacement was committed.
    pub fn set_falling_piece(&mut self, piece: Piece) -> bool {
        if self.over || !self.board.can_place(piece) {
            return false;
        }
        self.falling_piece = piece;
        true
    }

    /// Tries to translate the falling piece by `(dx, dy)`.
    ///
    /// Commits the new origin and returns `true`, or leaves the state
    /// untouched and returns `false`. Never partially applies.
    pub fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        self.set_falling_piece(self.falling_piece.offset(dx, dy))
    }

    /// Tries to rotate the falling piece one step clockwise at its current
    /// origin. No kick offsets are searched: the rotation either fits in
    /// place or is rejected.
    pub fn try_rotate(&mut self) -> bool {
        self.set_falling_piece(self.falling_piece.rotated())
    }

    /// Drops the falling piece straight down until it rests on the floor
    /// or the stack. Bounded by the board height.
    pub fn hard_drop(&mut self) {
        while self.try_move(0, 1) {}
    }

    /// Executes one turn: applies the input, then runs the lock check.
    ///
    /// If the piece cannot descend from its resulting position it locks:
    /// its cells are written into the board, completed rows clear and
    /// score, and a new piece spawns. The configured top-out rule then
    /// decides whether the game is over.
    ///
    /// Once over, further calls are no-ops; read accessors keep answering.
    pub fn advance(&mut self, input: Input) {
        if self.over {
            return;
        }

        if self.config.gravity == GravityMode::AutoStep {
            _ = self.try_move(0, 1);
        }

        match input {
            Input::Left => _ = self.try_move(-1, 0),
            Input::Right => _ = self.try_move(1, 0),
            Input::Down => _ = self.try_move(0, 1),
            Input::Rotate => _ = self.try_rotate(),
            Input::Drop => self.hard_drop(),
        }

        if !self.board.can_place(self.falling_piece.offset(0, 1)) {
            self.lock_piece();
        }
    }

    fn lock_piece(&mut self) {
        self.board.fill_piece(self.falling_piece);
        let cleared_lines = self.board.clear_lines();
        self.stats.lock_piece(cleared_lines);

        self.falling_piece = Piece::spawn(self.generator.next_piece());
        self.over = match self.config.top_out {
            TopOutRule::SpawnCollision => !self.board.can_place(self.falling_piece),
            TopOutRule::TopRowOccupied => self.board.is_row_occupied(0),
        };
    }
}

/// Plain-text frame: `$` for the falling piece, `@` for locked cells.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = [[' '; BOARD_WIDTH]; BOARD_HEIGHT];
        for (y, row) in self.board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    cells[y][x] = '@';
                }
            }
        }
        for (x, y) in self.falling_piece.occupied_cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                && x < BOARD_WIDTH
                && y < BOARD_HEIGHT
            {
                cells[y][x] = '$';
            }
        }

        let border = format!("+-{}+", "--".repeat(BOARD_WIDTH));
        writeln!(f, "{border}")?;
        for row in &cells {
            write!(f, "| ")?;
            for cell in row {
                write!(f, "{cell} ")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;
    use crate::core::{
        board::Cell,
        piece::{PieceKind, Rotation},
    };

    fn seed(n: u128) -> Seed {
        Seed::from_str(&format!("{n:032x}")).unwrap()
    }

    fn game_with(config: GameConfig) -> Game {
        Game::with_seed(config, seed(42))
    }

    fn game() -> Game {
        game_with(GameConfig::default())
    }

    fn fill_row(game: &mut Game, y: usize) {
        for x in 0..BOARD_WIDTH {
            game.board.fill_cell(x, y, Cell::Filled(PieceKind::I));
        }
    }

    /// Parks an O-piece at the bottom-left corner, away from the spawn
    /// columns.
    fn park_piece_bottom_left(game: &mut Game) {
        let parked = Piece::spawn(PieceKind::O).offset(-5, 18);
        assert!(game.set_falling_piece(parked));
    }

    #[test]
    fn test_initial_state() {
        let game = game();
        assert_eq!(game.score(), 0);
        assert!(!game.is_over());
        assert_eq!(game.falling_piece().x(), 5);
        assert_eq!(game.falling_piece().y(), 0);
        assert_eq!(game.falling_piece().rotation(), Rotation::default());
        assert!(game.board().rows().all(|row| row.iter().all(|c| c.is_empty())));
    }

    #[test]
    fn test_same_seed_same_piece_sequence() {
        let mut a = game();
        let mut b = game();
        for _ in 0..10 {
            assert_eq!(a.falling_piece().kind(), b.falling_piece().kind());
            a.advance(Input::Drop);
            b.advance(Input::Drop);
        }
    }

    #[test]
    fn test_try_move_commits_exactly_the_target() {
        let mut game = game();
        let before = game.falling_piece();

        assert!(game.try_move(1, 0));
        assert_eq!(game.falling_piece(), before.offset(1, 0));

        assert!(game.try_move(-1, 1));
        assert_eq!(game.falling_piece(), before.offset(0, 1));
    }

    #[test]
    fn test_try_move_rejection_changes_nothing() {
        let mut game = game();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O).offset(-5, 0)));
        let before = game.falling_piece();

        assert!(!game.try_move(-1, 0));
        assert_eq!(game.falling_piece(), before);
    }

    #[test]
    fn test_rotate_against_wall_is_rejected_without_kick() {
        let mut game = game();
        // I at origin (-1, 0): legal in rotation 0, but rotation 1 would
        // reach x = -1 and there is no kick offset to rescue it.
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::I).offset(-6, 0)));

        assert!(!game.try_rotate());
        assert_eq!(game.falling_piece().rotation(), Rotation::default());
        assert_eq!(game.falling_piece().x(), -1);
    }

    #[test]
    fn test_rotate_against_stack_is_rejected() {
        let mut game = game();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::I).offset(-5, 5)));
        // Rotation 1 of I sweeps columns 0..=3 of local row 2; block one.
        game.board.fill_cell(3, 7, Cell::Filled(PieceKind::O));

        assert!(!game.try_rotate());
        assert_eq!(game.falling_piece().rotation(), Rotation::default());
    }

    #[test]
    fn test_hard_drop_rests_on_floor_within_height_steps() {
        let mut game = game();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O)));

        game.hard_drop();

        let piece = game.falling_piece();
        assert_eq!(piece.y(), 18);
        assert!(!game.board().can_place(piece.offset(0, 1)));
    }

    #[test]
    fn test_hard_drop_rests_on_stack() {
        let mut game = game();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O)));
        game.board.fill_cell(5, 10, Cell::Filled(PieceKind::T));

        game.hard_drop();

        // O occupies rows y..=y+1 of columns 5..=6; it stops on the block.
        assert_eq!(game.falling_piece().y(), 8);
    }

    #[test]
    fn test_rejected_input_leaves_state_identical() {
        let mut game = game();
        // Top-left corner, floor far below: LEFT is rejected and the lock
        // check cannot fire.
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O).offset(-5, 0)));

        let board = game.board().clone();
        let piece = game.falling_piece();
        let stats = game.stats().clone();

        game.advance(Input::Left);

        assert_eq!(game.board(), &board);
        assert_eq!(game.falling_piece(), piece);
        assert_eq!(game.stats(), &stats);
        assert!(!game.is_over());
    }

    #[test]
    fn test_advance_down_locks_resting_piece() {
        let mut game = game();
        park_piece_bottom_left(&mut game);
        let parked = game.falling_piece();

        game.advance(Input::Down);

        // The rejected descent triggered the lock: cells transferred to the
        // board and a fresh piece spawned at the top.
        for (x, y) in parked.occupied_cells() {
            let cell = game
                .board()
                .cell(usize::try_from(x).unwrap(), usize::try_from(y).unwrap());
            assert_eq!(cell, Cell::Filled(PieceKind::O));
        }
        assert_eq!(game.falling_piece().y(), 0);
        assert_eq!(game.stats().locked_pieces(), 1);
        assert!(!game.is_over());
    }

    #[test]
    fn test_piece_locks_only_when_unable_to_fall() {
        let mut game = game();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O).offset(0, 10)));

        game.advance(Input::Down);

        // Mid-air: the descent was accepted, so no lock happened.
        assert_eq!(game.falling_piece().y(), 11);
        assert_eq!(game.stats().locked_pieces(), 0);
    }

    fn lock_with_full_rows(rows: usize) -> Game {
        let mut game = game();
        for y in (BOARD_HEIGHT - rows)..BOARD_HEIGHT {
            fill_row(&mut game, y);
        }
        // Rest the O-piece on top of the prepared stack (or the floor).
        let resting_y = i16::try_from(18 - rows).unwrap();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O).offset(-5, resting_y)));
        game.advance(Input::Down);
        game
    }

    #[test]
    fn test_scoring_is_exhaustive_over_clear_counts() {
        for (rows, expected) in [(0, 0), (1, 40), (2, 100), (3, 300), (4, 1200)] {
            let game = lock_with_full_rows(rows);
            assert_eq!(game.score(), expected, "{rows} cleared rows");
            assert_eq!(game.stats().line_clear_counter()[rows], 1);
        }
    }

    #[test]
    fn test_cleared_stack_compacts_onto_floor() {
        let game = lock_with_full_rows(2);
        // The locked O had both full rows below it, so it slid to the floor.
        assert_eq!(game.board().cell(0, 18), Cell::Filled(PieceKind::O));
        assert_eq!(game.board().cell(0, 19), Cell::Filled(PieceKind::O));
        let occupied: Vec<_> = (0..BOARD_HEIGHT)
            .filter(|&y| game.board().is_row_occupied(y))
            .collect();
        assert_eq!(occupied, [18, 19]);
    }

    #[test]
    fn test_lock_clears_separated_full_rows() {
        let mut game = game();
        fill_row(&mut game, 5);
        fill_row(&mut game, 7);
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O)));

        // Hard drop from spawn: the piece rests on top of the row-5 stack.
        game.advance(Input::Drop);

        // Both full rows vanished, the locked piece shifted down by the two
        // cleared rows beneath it, and the top rows are vacant.
        assert_eq!(game.score(), 100);
        assert!(!game.board().is_row_occupied(0));
        assert!(!game.board().is_row_occupied(1));
        let occupied: Vec<_> = (0..BOARD_HEIGHT)
            .filter(|&y| game.board().is_row_occupied(y))
            .collect();
        assert_eq!(occupied, [5, 6]);
    }

    #[test]
    fn test_blocked_spawn_sets_over() {
        let mut game = game();
        park_piece_bottom_left(&mut game);
        // Wall off every spawn cell any variant could occupy.
        for y in 0..5 {
            for x in 5..9 {
                game.board.fill_cell(x, y, Cell::Filled(PieceKind::Z));
            }
        }

        game.advance(Input::Down);

        assert!(game.is_over());
    }

    #[test]
    fn test_over_game_ignores_every_input() {
        let mut game = game();
        park_piece_bottom_left(&mut game);
        for y in 0..5 {
            for x in 5..9 {
                game.board.fill_cell(x, y, Cell::Filled(PieceKind::Z));
            }
        }
        game.advance(Input::Down);
        assert!(game.is_over());

        let board = game.board().clone();
        let piece = game.falling_piece();
        let score = game.score();
        for input in [Input::Left, Input::Right, Input::Down, Input::Rotate, Input::Drop] {
            game.advance(input);
            assert_eq!(game.board(), &board);
            assert_eq!(game.falling_piece(), piece);
            assert_eq!(game.score(), score);
            assert!(game.is_over());
        }
    }

    #[test]
    fn test_top_row_rule_tops_out_on_high_lock() {
        let mut game = game_with(GameConfig {
            top_out: TopOutRule::TopRowOccupied,
            ..GameConfig::default()
        });
        // Rest the O at the top-left corner on a two-cell pedestal.
        game.board.fill_cell(0, 2, Cell::Filled(PieceKind::J));
        game.board.fill_cell(1, 2, Cell::Filled(PieceKind::J));
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O).offset(-5, 0)));

        game.advance(Input::Down);

        assert!(game.is_over());
    }

    #[test]
    fn test_spawn_rule_tolerates_high_lock_outside_spawn_columns() {
        let mut game = game();
        game.board.fill_cell(0, 2, Cell::Filled(PieceKind::J));
        game.board.fill_cell(1, 2, Cell::Filled(PieceKind::J));
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O).offset(-5, 0)));

        game.advance(Input::Down);

        // Row 0 is occupied, but the spawn columns are free, so the default
        // rule keeps playing.
        assert!(game.board().is_row_occupied(0));
        assert!(!game.is_over());
    }

    #[test]
    fn test_auto_step_gravity_folds_one_descent_per_turn() {
        let mut game = game_with(GameConfig {
            gravity: GravityMode::AutoStep,
            ..GameConfig::default()
        });
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O)));

        game.advance(Input::Left);

        let piece = game.falling_piece();
        assert_eq!((piece.x(), piece.y()), (4, 1));
    }

    #[test]
    fn test_manual_gravity_leaves_height_to_the_driver() {
        let mut game = game();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O)));

        game.advance(Input::Left);

        let piece = game.falling_piece();
        assert_eq!((piece.x(), piece.y()), (4, 0));
    }

    #[test]
    fn test_display_frame() {
        let mut game = game();
        assert!(game.set_falling_piece(Piece::spawn(PieceKind::O)));
        game.board.fill_cell(0, 19, Cell::Filled(PieceKind::I));

        let frame = game.to_string();
        let lines: Vec<_> = frame.lines().collect();

        assert_eq!(lines.len(), BOARD_HEIGHT + 2);
        assert_eq!(lines[0], "+---------------------+");
        assert_eq!(lines[BOARD_HEIGHT + 1], "+---------------------+");
        // O at spawn covers columns 5..=6 of the top two rows.
        assert_eq!(lines[1], concat!("| ", "          ", "$ $ ", "      ", "|"));
        assert_eq!(lines[2], lines[1]);
        assert_eq!(lines[20], concat!("| ", "@ ", "                  ", "|"));
        assert!(lines[3..20].iter().all(|line| !line.contains('$')));
    }
}
