use std::time::Duration;

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::{
    Board, Command, CommandError, DropState, EventSink, GameEvent, GameSnapshot, GameState, Piece,
    PieceGenerator, PieceSeed, PieceSource,
};

/// Events emitted by a single command.
///
/// A lock produces at most three (`PieceLocked`, `LinesCleared`, `GameOver`).
pub type StepEvents = ArrayVec<GameEvent, 4>;

/// Result of applying one [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub command: Command,
    /// `Err` explains why the command was a no-op; the state is unchanged in that case.
    pub outcome: Result<(), CommandError>,
    pub events: StepEvents,
}

impl StepReport {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Command-driven falling-block game.
///
/// The engine owns the [`GameState`] exclusively and changes it only in response to commands,
/// applied one at a time in arrival order. Each command completes atomically: a hard drop
/// includes its lock, clear and spawn in the same step.
///
/// The engine does not own a timer. A scheduler sends [`Command::Tick`] every
/// [`GameEngine::drop_interval`] while [`DropState::Running`], re-reading the interval after
/// each tick since a line clear may raise the level.
///
/// # Example
///
/// ```
/// use tetoris_engine::{Command, GameEngine, PieceKind, PieceSequence};
///
/// let source = PieceSequence::new([PieceKind::O])?;
/// let mut engine = GameEngine::with_source(source);
/// for _ in 0..4 {
///     engine.apply(Command::MoveLeft);
/// }
/// let report = engine.apply(Command::HardDrop);
///
/// assert!(report.is_accepted());
/// assert_eq!(engine.state().board().occupied_count(), 4);
/// assert_eq!(engine.state().active().map(|p| p.position().y()), Some(0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine<S = PieceGenerator> {
    state: GameState,
    source: S,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Starts a game on an empty board with a randomly seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(PieceGenerator::new())
    }

    /// Starts a game whose piece draws are fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_source(PieceGenerator::with_seed(seed))
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.source.seed()
    }
}

impl<S> GameEngine<S>
where
    S: PieceSource,
{
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self::with_board(Board::EMPTY, source)
    }

    /// Starts a game on a prepared board.
    ///
    /// If the first piece does not fit at the spawn position the game is over from the start.
    #[must_use]
    pub fn with_board(board: Board, mut source: S) -> Self {
        let state = initial_state(board, &mut source);
        Self { state, source }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Interval the scheduler should wait before the next [`Command::Tick`].
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        crate::drop_interval(self.state.level())
    }

    /// Where the active piece would lock if hard-dropped now.
    #[must_use]
    pub fn drop_preview(&self) -> Option<Piece> {
        self.state
            .active
            .map(|piece| piece.simulate_drop_position(&self.state.board))
    }

    #[must_use]
    pub fn is_valid_placement(&self, piece: Piece) -> bool {
        self.state.board.is_valid_placement(piece)
    }

    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        self.try_replace_active(Piece::left)
    }

    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        self.try_replace_active(Piece::right)
    }

    /// Rotates 90° clockwise in place. There is no wall-kick search: a blocked rotation is
    /// rejected and the rotation state stays as it was.
    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        self.try_replace_active(Piece::rotated_right)
    }

    /// Moves the active piece down one row, locking it if it has landed.
    pub fn try_soft_drop(&mut self) -> Result<StepEvents, CommandError> {
        let mut events = StepEvents::new();
        self.step_down(&mut events)?;
        Ok(events)
    }

    /// Gravity step. Behaves exactly like [`GameEngine::try_soft_drop`].
    pub fn tick(&mut self) -> Result<StepEvents, CommandError> {
        self.try_soft_drop()
    }

    /// Drops the active piece to the lowest reachable row and locks it.
    pub fn hard_drop(&mut self) -> Result<StepEvents, CommandError> {
        let mut events = StepEvents::new();
        self.drop_to_bottom(&mut events)?;
        Ok(events)
    }

    /// Flips between running and paused, returning the new drop state.
    pub fn toggle_pause(&mut self) -> Result<DropState, CommandError> {
        if self.state.drop_state.is_game_over() {
            return Err(CommandError::GameOver);
        }
        self.state.drop_state.toggle_pause();
        debug!("drop state is now {:?}", self.state.drop_state);
        Ok(self.state.drop_state)
    }

    /// Reinitializes the game with an empty board. Always succeeds.
    ///
    /// The piece source continues where it left off.
    pub fn restart(&mut self) -> StepEvents {
        let mut events = StepEvents::new();
        self.reset(&mut events);
        events
    }

    pub fn apply(&mut self, command: Command) -> StepReport {
        let mut events = StepEvents::new();
        let outcome = match command {
            Command::MoveLeft => self.try_move_left(),
            Command::MoveRight => self.try_move_right(),
            Command::Rotate => self.try_rotate(),
            Command::SoftDrop | Command::Tick => self.step_down(&mut events),
            Command::HardDrop => self.drop_to_bottom(&mut events),
            Command::TogglePause => self.toggle_pause().map(|_| ()),
            Command::Restart => {
                self.reset(&mut events);
                Ok(())
            }
        };
        if let Err(err) = &outcome {
            trace!("{command} rejected: {err}");
        }
        StepReport {
            command,
            outcome,
            events,
        }
    }

    /// Applies `command` and forwards its events to `sink` in emission order.
    pub fn apply_with<E>(&mut self, command: Command, sink: &mut E) -> StepReport
    where
        E: EventSink + ?Sized,
    {
        let report = self.apply(command);
        for event in &report.events {
            sink.notify(event);
        }
        report
    }

    fn running_piece(&self) -> Result<Piece, CommandError> {
        match self.state.drop_state {
            DropState::GameOver => Err(CommandError::GameOver),
            DropState::Paused => Err(CommandError::Paused),
            DropState::Running => self.state.active.ok_or(CommandError::GameOver),
        }
    }

    fn try_replace_active(&mut self, f: fn(&Piece) -> Piece) -> Result<(), CommandError> {
        let candidate = f(&self.running_piece()?);
        if !self.state.board.is_valid_placement(candidate) {
            return Err(CommandError::Collision);
        }
        self.state.active = Some(candidate);
        Ok(())
    }

    fn step_down(&mut self, events: &mut StepEvents) -> Result<(), CommandError> {
        let piece = self.running_piece()?;
        let moved = piece.down();
        if self.state.board.is_valid_placement(moved) {
            self.state.active = Some(moved);
        } else {
            self.lock(piece, events);
        }
        Ok(())
    }

    fn drop_to_bottom(&mut self, events: &mut StepEvents) -> Result<(), CommandError> {
        let piece = self.running_piece()?;
        let dropped = piece.simulate_drop_position(&self.state.board);
        self.lock(dropped, events);
        Ok(())
    }

    fn lock(&mut self, piece: Piece, events: &mut StepEvents) {
        let state = &mut self.state;
        state.board.fill_piece(piece);
        state.active = None;
        debug!("locked {piece}");
        events.push(GameEvent::PieceLocked { piece });

        let level = state.stats.level();
        let lines = state.board.clear_lines();
        let points = state.stats.complete_piece_drop(lines);
        if lines > 0 {
            info!(
                "cleared {lines} line(s) for {points} points, total score {}",
                state.stats.score()
            );
            events.push(GameEvent::LinesCleared {
                lines,
                points,
                level,
            });
        }

        if piece.position().y() <= 0 {
            self.end_game(events);
            return;
        }

        let kind = std::mem::replace(&mut self.state.next, self.source.draw());
        let spawned = Piece::new(kind);
        if !self.state.board.is_valid_placement(spawned) {
            self.end_game(events);
            return;
        }
        self.state.active = Some(spawned);
    }

    fn end_game(&mut self, events: &mut StepEvents) {
        self.state.drop_state = DropState::GameOver;
        let score = self.state.score();
        info!("game over with score {score}");
        events.push(GameEvent::GameOver { score });
    }

    fn reset(&mut self, events: &mut StepEvents) {
        self.state = initial_state(Board::EMPTY, &mut self.source);
        info!("game restarted");
        events.push(GameEvent::Restarted);
    }
}

fn initial_state<S>(board: Board, source: &mut S) -> GameState
where
    S: PieceSource,
{
    let active = source.draw();
    let next = source.draw();
    let mut state = GameState::new(board, active, next);
    if !state.board.is_valid_placement(Piece::new(active)) {
        state.active = None;
        state.drop_state = DropState::GameOver;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, PieceKind, PiecePosition, PieceRotation, PieceSequence};

    const EMPTY_ROW: &str = "..........";

    fn sequence(pieces: &[PieceKind]) -> PieceSequence {
        PieceSequence::new(pieces.iter().copied()).unwrap()
    }

    fn engine(pieces: &[PieceKind]) -> GameEngine<PieceSequence> {
        GameEngine::with_source(sequence(pieces))
    }

    /// Board whose bottom rows are `rows`, everything above empty.
    fn bottom_board(rows: &[&str]) -> Board {
        let mut all = vec![EMPTY_ROW; Board::HEIGHT - rows.len()];
        all.extend_from_slice(rows);
        Board::parse_rows(all).unwrap()
    }

    fn active(engine: &GameEngine<impl PieceSource>) -> Piece {
        *engine.state().active().unwrap()
    }

    #[test]
    fn test_new_game_draws_two_pieces() {
        let engine = engine(&[PieceKind::T, PieceKind::S, PieceKind::Z]);
        let state = engine.state();
        assert_eq!(state.active(), Some(&Piece::new(PieceKind::T)));
        assert_eq!(state.next(), PieceKind::S);
        assert_eq!(state.board(), &Board::EMPTY);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert!(state.drop_state().is_running());
        assert_eq!(engine.drop_interval(), Duration::from_millis(800));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let seed = PieceSeed::from_bytes([7; 16]);
        let mut first = GameEngine::with_seed(seed);
        let mut second = GameEngine::with_seed(seed);
        assert_eq!(first.seed(), seed);
        for _ in 0..5 {
            first.apply(Command::HardDrop);
            second.apply(Command::HardDrop);
        }
        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn test_horizontal_moves_stop_at_walls() {
        let mut engine = engine(&[PieceKind::O]);
        for x in (0..4).rev() {
            assert_eq!(engine.try_move_left(), Ok(()));
            assert_eq!(active(&engine).position(), PiecePosition::new(x, 0));
        }
        assert_eq!(engine.try_move_left(), Err(CommandError::Collision));
        assert_eq!(active(&engine).position(), PiecePosition::new(0, 0));

        for _ in 0..8 {
            assert_eq!(engine.try_move_right(), Ok(()));
        }
        assert_eq!(engine.try_move_right(), Err(CommandError::Collision));
        assert_eq!(active(&engine).position(), PiecePosition::new(8, 0));
    }

    #[test]
    fn test_horizontal_move_blocked_by_locked_cell() {
        let mut board = Board::EMPTY;
        board.set_cell(3, 1, Cell::Filled(PieceKind::Z));
        let mut engine = GameEngine::with_board(board, sequence(&[PieceKind::O]));
        let report = engine.apply(Command::MoveLeft);
        assert_eq!(report.outcome, Err(CommandError::Collision));
        assert!(report.events.is_empty());
        assert_eq!(active(&engine), Piece::new(PieceKind::O));
    }

    #[test]
    fn test_rotation_advances_state() {
        let mut engine = engine(&[PieceKind::T]);
        for index in [1, 2, 3, 0] {
            assert_eq!(engine.try_rotate(), Ok(()));
            assert_eq!(active(&engine).rotation().index(), index);
        }
    }

    #[test]
    fn test_blocked_rotation_is_rejected() {
        // A vertical I at the spawn anchor would cover column 6, rows 0-3.
        let mut board = Board::EMPTY;
        board.set_cell(6, 3, Cell::Filled(PieceKind::J));
        let mut engine = GameEngine::with_board(board, sequence(&[PieceKind::I]));
        let before = active(&engine);
        assert_eq!(engine.try_rotate(), Err(CommandError::Collision));
        assert_eq!(active(&engine), before);
        assert_eq!(active(&engine).rotation().index(), 0);
    }

    #[test]
    fn test_rotation_against_wall_has_no_kick() {
        // Vertical I in column 9, then rotating back to horizontal would leave the board.
        let mut engine = engine(&[PieceKind::I]);
        engine.try_rotate().unwrap();
        for _ in 0..3 {
            engine.try_move_right().unwrap();
        }
        let before = active(&engine);
        assert_eq!(engine.try_rotate(), Err(CommandError::Collision));
        assert_eq!(active(&engine), before);
    }

    #[test]
    fn test_soft_drop_then_hard_drop_scenario() {
        let mut engine = engine(&[PieceKind::O]);
        for _ in 0..18 {
            let events = engine.try_soft_drop().unwrap();
            assert!(events.is_empty());
        }
        assert_eq!(active(&engine).position(), PiecePosition::new(4, 18));

        // The 19th soft drop finds the floor and locks.
        let events = engine.try_soft_drop().unwrap();
        assert_eq!(
            events.as_slice(),
            [GameEvent::PieceLocked {
                piece: Piece::with_placement(
                    PieceKind::O,
                    PieceRotation::SPAWN,
                    PiecePosition::new(4, 18)
                )
            }]
        );

        let events = engine.hard_drop().unwrap();
        assert_eq!(events.len(), 1);
        assert!(!engine.state().is_game_over());
        assert_eq!(engine.state().stats().completed_pieces(), 2);
        assert_eq!(engine.state().board().occupied_count(), 8);
        assert_eq!(
            engine.state().board().cell(4, 16),
            Some(Cell::Filled(PieceKind::O))
        );
        assert_eq!(active(&engine), Piece::new(PieceKind::O));
    }

    #[test]
    fn test_tick_matches_soft_drop() {
        let mut ticked = engine(&[PieceKind::L, PieceKind::S]);
        let mut dropped = engine(&[PieceKind::L, PieceKind::S]);
        for _ in 0..25 {
            ticked.apply(Command::Tick);
            dropped.apply(Command::SoftDrop);
            assert_eq!(ticked.snapshot(), dropped.snapshot());
        }
    }

    #[test]
    fn test_hard_drop_equals_repeated_soft_drops() {
        let seed = PieceSeed::from_bytes([0x5A; 16]);
        let mut hard = GameEngine::with_seed(seed);
        let mut soft = GameEngine::with_seed(seed);

        for step in 0..12 {
            let shift = if step % 2 == 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            };
            for command in [shift, shift, Command::Rotate] {
                hard.apply(command);
                soft.apply(command);
            }

            let hard_events = hard.apply(Command::HardDrop).events;
            let pieces = soft.state().stats().completed_pieces();
            let mut soft_events = StepEvents::new();
            while soft.state().stats().completed_pieces() == pieces {
                soft_events = soft.apply(Command::SoftDrop).events;
            }

            assert_eq!(hard_events, soft_events);
            assert_eq!(hard.snapshot(), soft.snapshot());
            if hard.state().is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn test_drop_preview() {
        let engine = engine(&[PieceKind::O]);
        assert_eq!(
            engine.drop_preview().map(|piece| piece.position()),
            Some(PiecePosition::new(4, 18))
        );
        assert!(engine.is_valid_placement(engine.drop_preview().unwrap()));
        assert!(!engine.is_valid_placement(engine.drop_preview().unwrap().down()));
    }

    #[test]
    fn test_single_line_clear_shifts_rows() {
        let board = bottom_board(&["J.........", "IIIIIIIII."]);
        let mut engine = GameEngine::with_board(board, sequence(&[PieceKind::I]));

        // Stand the I up in column 6, then slide it to column 9.
        engine.try_rotate().unwrap();
        for _ in 0..3 {
            engine.try_move_right().unwrap();
        }
        let report = engine.apply(Command::HardDrop);

        assert_eq!(report.events.len(), 2);
        assert!(report.events[0].is_piece_locked());
        assert_eq!(
            report.events[1],
            GameEvent::LinesCleared {
                lines: 1,
                points: 40,
                level: 1
            }
        );

        let board = engine.state().board();
        assert_eq!(board.cell(0, 19), Some(Cell::Filled(PieceKind::J)));
        assert_eq!(board.cell(9, 19), Some(Cell::Filled(PieceKind::I)));
        assert_eq!(board.cell(9, 17), Some(Cell::Filled(PieceKind::I)));
        assert_eq!(board.cell(9, 16), Some(Cell::Empty));
        assert_eq!(board.cell(0, 18), Some(Cell::Empty));
        assert_eq!(board.occupied_count(), 4);
        assert!(board.rows().next().unwrap().iter().all(|cell| cell.is_empty()));

        let state = engine.state();
        assert_eq!(state.score(), 40);
        assert_eq!(state.lines_cleared(), 1);
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn test_double_clear_scores_by_table() {
        let board = bottom_board(&["IIIIIIII..", "IIIIIIII.."]);
        let mut engine = GameEngine::with_board(board, sequence(&[PieceKind::O]));
        for _ in 0..4 {
            engine.try_move_right().unwrap();
        }
        let events = engine.hard_drop().unwrap();
        assert!(events.contains(&GameEvent::LinesCleared {
            lines: 2,
            points: 100,
            level: 1
        }));
        assert_eq!(engine.state().board(), &Board::EMPTY);
        assert_eq!(engine.state().score(), 100);
        assert_eq!(
            engine.state().stats().line_cleared_counter(),
            &[0, 0, 1, 0, 0]
        );
    }

    #[test]
    fn test_level_rises_every_ten_lines() {
        let board = bottom_board(&["IIIIIIII..", "IIIIIIII.."]);
        let mut engine = GameEngine::with_board(board.clone(), sequence(&[PieceKind::O]));
        let mut score = 0;
        for round in 0..6 {
            let level = engine.state().level();
            for _ in 0..4 {
                engine.try_move_right().unwrap();
            }
            engine.hard_drop().unwrap();
            score += 100 * level;
            assert_eq!(engine.state().score(), score);
            assert_eq!(engine.state().lines_cleared(), 2 * (round + 1));
            // Refill the two rows for the next round.
            engine.state.board = board.clone();
        }
        assert_eq!(engine.state().level(), 2);
        assert_eq!(engine.drop_interval(), Duration::from_millis(650));
    }

    #[test]
    fn test_lock_at_spawn_row_ends_game() {
        let rows = ["IIIIIIIII."; 18];
        let board = bottom_board(&rows);
        let mut engine = GameEngine::with_board(board, sequence(&[PieceKind::O]));

        let report = engine.apply(Command::SoftDrop);
        assert!(report.is_accepted());
        assert_eq!(report.events.len(), 2);
        assert!(report.events[0].is_piece_locked());
        assert_eq!(report.events[1], GameEvent::GameOver { score: 0 });

        let state = engine.state();
        assert!(state.is_game_over());
        assert!(state.drop_state().is_game_over());
        assert_eq!(state.active(), None);
        assert_eq!(state.board().cell(4, 0), Some(Cell::Filled(PieceKind::O)));
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        // The I stands in column 4 on top of the stack and blocks the O's spawn cells.
        let rows = ["IIIIIIIII."; 15];
        let board = bottom_board(&rows);
        let mut engine =
            GameEngine::with_board(board, sequence(&[PieceKind::I, PieceKind::O]));
        engine.try_rotate().unwrap();
        engine.try_move_left().unwrap();
        engine.try_move_left().unwrap();

        let events = engine.hard_drop().unwrap();
        match events.as_slice() {
            [GameEvent::PieceLocked { piece }, GameEvent::GameOver { .. }] => {
                assert_eq!(piece.position().y(), 1);
            }
            other => panic!("unexpected events {other:?}"),
        }
        assert!(engine.state().is_game_over());
        assert_eq!(engine.state().active(), None);
        // Nothing overlapping was written.
        assert_eq!(engine.state().board().occupied_count(), 15 * 9 + 4);
    }

    #[test]
    fn test_board_that_blocks_first_spawn() {
        let mut board = Board::EMPTY;
        board.set_cell(4, 0, Cell::Filled(PieceKind::T));
        let engine = GameEngine::with_board(board, sequence(&[PieceKind::O]));
        assert!(engine.state().is_game_over());
        assert_eq!(engine.state().active(), None);
        assert_eq!(engine.drop_preview(), None);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut board = Board::EMPTY;
        board.set_cell(4, 0, Cell::Filled(PieceKind::T));
        let mut engine = GameEngine::with_board(board, sequence(&[PieceKind::O]));
        let before = engine.snapshot();
        for command in Command::ALL {
            if command == Command::Restart {
                continue;
            }
            let report = engine.apply(command);
            assert_eq!(report.outcome, Err(CommandError::GameOver), "{command}");
            assert!(report.events.is_empty());
        }
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_pause_blocks_movement() {
        let mut engine = engine(&[PieceKind::T]);
        assert_eq!(engine.toggle_pause(), Ok(DropState::Paused));
        assert!(engine.state().is_paused());
        let before = engine.snapshot();

        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::HardDrop,
            Command::Tick,
        ] {
            assert_eq!(engine.apply(command).outcome, Err(CommandError::Paused));
        }
        assert_eq!(engine.snapshot(), before);

        assert!(engine.apply(Command::TogglePause).is_accepted());
        assert!(engine.state().drop_state().is_running());
        assert!(engine.apply(Command::MoveLeft).is_accepted());
    }

    #[test]
    fn test_restart_reinitializes() {
        let mut engine = engine(&[PieceKind::O, PieceKind::T, PieceKind::I]);
        engine.apply(Command::HardDrop);
        engine.apply(Command::TogglePause);

        let report = engine.apply(Command::Restart);
        assert!(report.is_accepted());
        assert_eq!(report.events.as_slice(), [GameEvent::Restarted]);

        let state = engine.state();
        assert_eq!(state.board(), &Board::EMPTY);
        assert_eq!(state.score(), 0);
        assert_eq!(state.stats().completed_pieces(), 0);
        assert!(state.drop_state().is_running());
        // The source keeps going: O and T were used, I drawn as next, then O, T.
        assert_eq!(state.active(), Some(&Piece::new(PieceKind::O)));
        assert_eq!(state.next(), PieceKind::T);
    }

    #[test]
    fn test_restart_after_game_over() {
        let rows = ["IIIIIIIII."; 18];
        let mut engine = GameEngine::with_board(bottom_board(&rows), sequence(&[PieceKind::O]));
        engine.apply(Command::HardDrop);
        assert!(engine.state().is_game_over());

        let events = engine.restart();
        assert_eq!(events.as_slice(), [GameEvent::Restarted]);
        assert!(!engine.state().is_game_over());
        assert_eq!(engine.state().board(), &Board::EMPTY);
        assert!(engine.state().active().is_some());
    }

    #[test]
    fn test_apply_with_forwards_events() {
        let mut engine = engine(&[PieceKind::O]);
        let mut seen = vec![];
        let report = engine.apply_with(Command::HardDrop, &mut |event: &GameEvent| {
            seen.push(event.clone());
        });
        assert_eq!(seen.as_slice(), report.events.as_slice());
        assert_eq!(seen.len(), 1);
    }
}
