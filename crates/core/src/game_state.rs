//! Game state module - the session state machine
//!
//! Ties together the board, pieces, wall kicks, sampling and scoring, and owns
//! the arming of the periodic advance trigger.
//!
//! States: Idle → Running ⇄ Paused → GameOver. `start_game` enters Running
//! from any state. Rejected actions are silent no-ops that return `false`.
//! Every committed transition updates the grid, piece, ghost, score and level
//! together before returning.

use crate::board::Board;
use crate::kicks::try_wall_kick;
use crate::pieces::Piece;
use crate::rng::PieceSampler;
use crate::snapshot::GameSnapshot;
use crate::timer::{ManualTimer, RepeatingTimer};
use crate::types::*;

/// Session tuning that is not part of the fixed rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Interval of the periodic advance trigger
    pub tick_interval_ms: u32,
    /// Shorten the interval by `SPEED_INCREASE` per level
    pub level_speedup: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: INITIAL_SPEED_MS,
            level_speedup: false,
        }
    }
}

impl SessionConfig {
    /// Tick interval for `level`
    pub fn interval_for_level(&self, level: u32) -> u32 {
        if !self.level_speedup {
            return self.tick_interval_ms;
        }
        let steps = level.saturating_sub(1).min(64) as i32;
        let scaled = self.tick_interval_ms as f64 * SPEED_INCREASE.powi(steps);
        (scaled.round() as u32).max(MIN_SPEED_MS.min(self.tick_interval_ms))
    }
}

/// Score after clearing `lines` rows at `level`
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(POINTS_PER_LINE)
        .saturating_mul(level)
}

/// Level implied by a total score (starts at 1)
pub fn level_for_score(score: u32) -> u32 {
    score / (POINTS_PER_LINE * LINES_PER_LEVEL) + 1
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<T: RepeatingTimer = ManualTimer> {
    grid: Board,
    current: Piece,
    next: Piece,
    ghost: Position,
    sampler: PieceSampler,
    timer: T,
    config: SessionConfig,
    tick_interval_ms: u32,
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl<T: RepeatingTimer> GameState<T> {
    /// Create an idle session with the given RNG seed
    pub fn new(timer: T, seed: u32) -> Self {
        Self::with_config(timer, seed, SessionConfig::default())
    }

    pub fn with_config(timer: T, seed: u32, config: SessionConfig) -> Self {
        let mut sampler = PieceSampler::new(seed);
        let current = Piece::spawn(sampler.draw());
        let next = Piece::spawn(sampler.draw());
        let grid = Board::new();

        Self {
            ghost: grid.ghost_position(&current),
            grid,
            current,
            next,
            sampler,
            timer,
            config,
            tick_interval_ms: config.tick_interval_ms,
            last_event: None,
            score: 0,
            level: 1,
            lines: 0,
            started: false,
            paused: false,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &Board {
        &self.grid
    }

    pub fn current_piece(&self) -> Piece {
        self.current
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    /// Landing position of the current piece
    pub fn ghost_piece(&self) -> Position {
        self.ghost
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Running, not paused, not over
    pub fn is_playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Interval the timer was last armed with
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = self.grid.to_rows();
        out.current = self.current;
        out.next = self.next;
        out.ghost = self.ghost;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    /// Replace the playfield, e.g. to set up a puzzle. The ghost follows.
    pub fn load_grid(&mut self, grid: Board) {
        self.grid = grid;
        self.ghost = self.grid.ghost_position(&self.current);
    }

    /// Reset every field and arm the periodic trigger
    pub fn start_game(&mut self) {
        self.timer.disarm();

        self.grid = Board::new();
        self.current = Piece::spawn(self.sampler.draw());
        self.next = Piece::spawn(self.sampler.draw());
        self.ghost = self.grid.ghost_position(&self.current);
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.last_event = None;
        self.started = true;
        self.paused = false;
        self.game_over = false;

        self.tick_interval_ms = self.config.interval_for_level(self.level);
        self.timer.arm(self.tick_interval_ms);
    }

    pub fn move_left(&mut self) -> bool {
        self.is_playable() && self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.is_playable() && self.try_shift(1, 0)
    }

    /// Shift down one row, or lock (clear, score, spawn, maybe game over)
    pub fn move_down(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        self.step_down();
        true
    }

    /// Rotate clockwise in place, falling back to wall kicks
    pub fn rotate(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }

        let new_rotation = self.current.rotation.rotate_cw();
        let turned = self.current.with_rotation(new_rotation);
        if !self.grid.has_collision(&turned, None) {
            self.commit_piece(turned);
            return true;
        }

        match try_wall_kick(&self.grid, &self.current, new_rotation) {
            Some(position) => {
                self.commit_piece(turned.with_position(position));
                true
            }
            None => false,
        }
    }

    /// Drop to the landing row and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        let landing = self.grid.ghost_position(&self.current);
        self.current = self.current.with_position(landing);
        self.step_down();
        true
    }

    /// Disarm the trigger and mark paused. Safe to repeat.
    pub fn pause_game(&mut self) {
        self.timer.disarm();
        self.paused = true;
    }

    /// Re-arm the trigger if paused. A finished or idle session stays disarmed.
    pub fn resume_game(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        if self.started && !self.game_over {
            self.timer.arm(self.tick_interval_ms);
        }
        true
    }

    /// Timer callback: one gravity step when armed, running and not paused
    pub fn tick(&mut self) -> bool {
        if !self.timer.is_armed() || !self.is_playable() {
            return false;
        }
        self.step_down();
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => {
                self.pause_game();
                true
            }
            GameAction::Resume => self.resume_game(),
            GameAction::TogglePause => {
                if self.paused {
                    self.resume_game()
                } else {
                    self.pause_game();
                    true
                }
            }
            GameAction::Start => {
                self.start_game();
                true
            }
        }
    }

    /// Try to move the current piece; commits only when collision-free
    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let target = self.current.position.offset(dx, dy);
        if self.grid.has_collision(&self.current, Some(target)) {
            return false;
        }
        self.commit_piece(self.current.with_position(target));
        true
    }

    fn commit_piece(&mut self, piece: Piece) {
        self.current = piece;
        self.ghost = self.grid.ghost_position(&self.current);
    }

    fn step_down(&mut self) {
        if !self.try_shift(0, 1) {
            self.lock_current();
        }
    }

    /// Lock the current piece, then either end the game or clear, score and spawn
    fn lock_current(&mut self) {
        let piece = self.current;

        // A piece that cannot leave the spawn row ends the game.
        if piece.position.y <= 0 {
            self.game_over = true;
            self.timer.disarm();
            self.last_event = Some(LockEvent {
                game_over: true,
                ..LockEvent::default()
            });
            return;
        }

        debug_assert!(
            self.grid.contains(&piece),
            "locking a piece outside the playfield: {:?}",
            piece
        );

        let (grid, cleared) = self.grid.lock_piece(&piece).clear_lines();
        let cleared = cleared as u32;
        let gained = line_clear_score(cleared, self.level);
        let previous_level = self.level;

        self.score = self.score.saturating_add(gained);
        self.lines += cleared;
        self.level = level_for_score(self.score);

        self.grid = grid;
        self.current = self.next;
        self.next = Piece::spawn(self.sampler.draw());
        self.ghost = self.grid.ghost_position(&self.current);

        let level_up = self.level != previous_level;
        if level_up && self.config.level_speedup {
            self.tick_interval_ms = self.config.interval_for_level(self.level);
            self.timer.arm(self.tick_interval_ms);
        }

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            score_gained: gained,
            level_up,
            game_over: false,
        });
    }
}

impl GameState<ManualTimer> {
    /// Let `elapsed_ms` pass on the manual timer, ticking once per elapsed
    /// interval. Returns the number of ticks applied.
    pub fn advance_time(&mut self, elapsed_ms: u32) -> u32 {
        let due = self.timer.advance(elapsed_ms);
        let mut applied = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            applied += 1;
        }
        applied
    }
}

impl Default for GameState<ManualTimer> {
    fn default() -> Self {
        Self::new(ManualTimer::new(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(ManualTimer::new(), seed);
        state.start_game();
        state
    }

    fn fill_row_except(grid: &mut Board, y: i8, holes: &[i8]) {
        for x in 0..GRID_WIDTH as i8 {
            if !holes.contains(&x) {
                grid.set(x, y, FILLED);
            }
        }
    }

    #[test]
    fn test_new_game_state_is_idle() {
        let state = GameState::new(ManualTimer::new(), 12345);

        assert!(!state.started);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(!state.timer.is_armed());
        assert_eq!(state.grid.filled_count(), 0);
    }

    #[test]
    fn test_idle_session_ignores_actions() {
        let mut state = GameState::new(ManualTimer::new(), 12345);
        let before = state.current;
        assert!(!state.move_left());
        assert!(!state.move_down());
        assert!(!state.hard_drop());
        assert!(!state.tick());
        assert_eq!(state.current, before);
    }

    #[test]
    fn test_start_arms_timer() {
        let state = started(12345);
        assert!(state.started);
        assert_eq!(state.timer.interval_ms(), Some(INITIAL_SPEED_MS));
        assert_eq!(state.current.position.y, 0);
        assert_eq!(state.ghost.y, state.grid.ghost_position(&state.current).y);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = started(7);
        state.score = 4200;
        state.level = 5;
        state.lines = 42;
        state.game_over = true;
        state.paused = true;
        state.grid = Board::filled();
        state.timer.disarm();

        state.start_game();

        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.grid, Board::new());
        assert!(state.timer.is_armed());
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let mut state = started(12345);
        state.current = Piece::spawn(PieceKind::O).with_position(Position::new(0, 0));
        state.ghost = state.grid.ghost_position(&state.current);

        assert!(!state.move_left());
        assert_eq!(state.current.position, Position::new(0, 0));

        assert!(state.move_right());
        assert_eq!(state.current.position, Position::new(1, 0));
    }

    #[test]
    fn test_move_down_shifts_and_updates_ghost() {
        let mut state = started(12345);
        let y = state.current.position.y;
        let ghost = state.ghost;
        assert!(state.move_down());
        assert_eq!(state.current.position.y, y + 1);
        assert_eq!(state.ghost, ghost);
    }

    #[test]
    fn test_hard_drop_line_clear_scoring() {
        let mut state = started(12345);
        // Bottom row full except columns 4 and 5; an O dropped there completes it.
        fill_row_except(&mut state.grid, 19, &[4, 5]);
        state.current = Piece::spawn(PieceKind::O);
        state.level = 3;

        assert!(state.hard_drop());

        assert_eq!(state.score, POINTS_PER_LINE * 3);
        assert_eq!(state.lines, 1);
        // The O's upper half remains, shifted down into the bottom row.
        assert_eq!(state.grid.filled_count(), 2);
        assert!(state.grid.is_filled(4, 19));
        assert!(state.grid.is_filled(5, 19));

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.score_gained, 300);
        assert!(!event.game_over);
    }

    #[test]
    fn test_lock_promotes_next_piece() {
        let mut state = started(12345);
        let next = state.next;
        state.hard_drop();
        assert_eq!(state.current, next);
        assert_eq!(state.current.position.y, 0);
        assert_eq!(state.ghost, state.grid.ghost_position(&state.current));
        assert_eq!(state.grid.filled_count(), 4);
    }

    #[test]
    fn test_level_follows_score() {
        let mut state = started(12345);
        state.score = 900;
        fill_row_except(&mut state.grid, 19, &[4, 5]);
        state.current = Piece::spawn(PieceKind::O);

        state.hard_drop();

        assert_eq!(state.score, 1000);
        assert_eq!(state.level, 2);
        assert!(state.take_last_event().unwrap().level_up);
        // Fixed interval unless speed-up is enabled.
        assert_eq!(state.timer.interval_ms(), Some(INITIAL_SPEED_MS));
    }

    #[test]
    fn test_level_speedup_rearms_timer() {
        let config = SessionConfig {
            level_speedup: true,
            ..SessionConfig::default()
        };
        let mut state = GameState::with_config(ManualTimer::new(), 12345, config);
        state.start_game();
        state.score = 900;
        fill_row_except(&mut state.grid, 19, &[4, 5]);
        state.current = Piece::spawn(PieceKind::O);

        state.hard_drop();

        assert_eq!(state.level, 2);
        assert_eq!(state.tick_interval_ms, 850);
        assert_eq!(state.timer.interval_ms(), Some(850));
    }

    #[test]
    fn test_interval_for_level() {
        let fixed = SessionConfig::default();
        assert_eq!(fixed.interval_for_level(10), INITIAL_SPEED_MS);

        let scaled = SessionConfig {
            level_speedup: true,
            ..SessionConfig::default()
        };
        assert_eq!(scaled.interval_for_level(1), 1000);
        assert_eq!(scaled.interval_for_level(2), 850);
        assert_eq!(scaled.interval_for_level(4), 614);
        assert_eq!(scaled.interval_for_level(100), MIN_SPEED_MS);
    }

    #[test]
    fn test_game_over_on_full_grid() {
        let mut state = started(12345);
        state.grid = Board::filled();

        assert!(state.move_down());

        assert!(state.game_over);
        assert!(!state.timer.is_armed());
        assert_eq!(state.timer.disarm_count(), 1);
        assert!(state.take_last_event().unwrap().game_over);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = started(12345);
        state.grid = Board::filled();
        state.move_down();

        let piece = state.current;
        let score = state.score;
        assert!(!state.move_left());
        assert!(!state.rotate());
        assert!(!state.hard_drop());
        assert!(!state.tick());
        assert_eq!(state.current, piece);
        assert_eq!(state.score, score);

        // Resuming a finished game never re-arms.
        state.pause_game();
        state.resume_game();
        assert!(!state.timer.is_armed());
    }

    #[test]
    fn test_rotate_in_place() {
        let mut state = started(12345);
        state.current = Piece::spawn(PieceKind::T).with_position(Position::new(4, 5));

        assert!(state.rotate());
        assert_eq!(state.current.rotation, Rotation::East);
        assert_eq!(state.current.position, Position::new(4, 5));
    }

    #[test]
    fn test_rotate_with_wall_kick() {
        let mut state = started(12345);
        state.current = Piece {
            kind: PieceKind::J,
            position: Position::new(8, 5),
            rotation: Rotation::West,
        };

        assert!(state.rotate());
        assert_eq!(state.current.rotation, Rotation::North);
        assert_eq!(state.current.position, Position::new(7, 5));
        assert_eq!(state.ghost, state.grid.ghost_position(&state.current));
    }

    #[test]
    fn test_rotate_rejected_leaves_piece_unchanged() {
        let mut state = started(12345);
        let piece = Piece::spawn(PieceKind::T).with_position(Position::new(4, 10));
        let mut grid = Board::filled();
        for cell in piece.cells() {
            grid.set(cell.x, cell.y, EMPTY);
        }
        state.grid = grid;
        state.current = piece;

        assert!(!state.rotate());
        assert_eq!(state.current, piece);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = started(12345);
        state.pause_game();
        assert!(state.paused);
        assert!(!state.timer.is_armed());

        let piece = state.current;
        assert!(!state.tick());
        assert!(!state.move_left());
        assert_eq!(state.advance_time(5000), 0);
        assert_eq!(state.current, piece);

        // Pausing twice is harmless.
        state.pause_game();
        assert_eq!(state.timer.disarm_count(), 1);

        assert!(state.resume_game());
        assert!(!state.paused);
        assert!(state.timer.is_armed());
        assert_eq!(state.current, piece);

        // Resume while running is a no-op.
        assert!(!state.resume_game());
        assert_eq!(state.timer.arm_count(), 2);
    }

    #[test]
    fn test_advance_time_applies_gravity() {
        let mut state = started(12345);
        let y = state.current.position.y;
        assert_eq!(state.advance_time(999), 0);
        assert_eq!(state.advance_time(1), 1);
        assert_eq!(state.current.position.y, y + 1);
        assert_eq!(state.advance_time(3000), 3);
        assert_eq!(state.current.position.y, y + 4);
    }

    #[test]
    fn test_apply_action_toggle_pause() {
        let mut state = started(12345);
        assert!(state.apply_action(GameAction::TogglePause));
        assert!(state.paused);
        assert!(state.apply_action(GameAction::TogglePause));
        assert!(!state.paused);
    }

    #[test]
    fn test_load_grid_recomputes_ghost() {
        let mut state = started(12345);
        let mut grid = Board::new();
        fill_row_except(&mut grid, 19, &[]);
        fill_row_except(&mut grid, 18, &[]);
        state.load_grid(grid);
        assert_eq!(state.ghost, state.grid.ghost_position(&state.current));
    }
}
