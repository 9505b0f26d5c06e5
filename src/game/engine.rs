use tracing::{debug, info, warn};

use super::board::{Board, Counter, CounterState, Position, MAX_COLUMNS, MAX_ROWS};
use super::player::{PlayerColor, Players};
use super::position::{to_presentation, PresentationPosition};
use super::win::Line;
use crate::configuration::{ConfigurationSource, FetchResult, PendingConfiguration};
use crate::presentation::PresentationSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Play continues with `next` on move.
    Continue { next: PlayerColor },
    /// `winner` completed a line; `cells` were marked winning, landing first.
    Win {
        winner: PlayerColor,
        cells: Vec<Position>,
    },
    Draw,
    /// The column was already full. Nothing changed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no game in progress")]
    NotInProgress,

    #[error("column {0} is off the board")]
    InvalidColumn(usize),
}

/// Owns the board and turn order, and reports every change to its sink.
pub struct GameEngine<S, C> {
    board: Board,
    turns_taken: usize,
    current_player: PlayerColor,
    players: Option<Players>,
    phase: GamePhase,
    pending: Vec<PendingConfiguration>,
    sink: S,
    source: C,
}

impl<S: PresentationSink, C: ConfigurationSource> GameEngine<S, C> {
    pub fn new(sink: S, source: C) -> Self {
        GameEngine {
            board: Board::new(),
            turns_taken: 0,
            current_player: PlayerColor::PlayerA,
            players: None,
            phase: GamePhase::NotStarted,
            pending: Vec::new(),
            sink,
            source,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    pub fn current_player(&self) -> PlayerColor {
        self.current_player
    }

    pub fn players(&self) -> Option<&Players> {
        self.players.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// True while any configuration fetch has not reported back.
    pub fn is_fetching(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Name for `color`, falling back to a default until players arrive.
    pub fn player_name(&self, color: PlayerColor) -> &str {
        match &self.players {
            Some(players) => &players.get(color).name,
            None => color.default_name(),
        }
    }

    /// Begin a fresh game and request player configuration.
    pub fn start_game(&mut self) {
        self.reset();
        self.phase = GamePhase::InProgress;
        info!("game started");
        self.sink.on_board_reset();

        // Earlier fetches stay outstanding and still deliver when they finish.
        self.pending.push(self.source.fetch_configuration());
        self.poll_configuration();
    }

    /// Deliver every finished configuration fetch, oldest first. Returns true
    /// when at least one was delivered.
    pub fn poll_configuration(&mut self) -> bool {
        let mut results = Vec::new();
        self.pending.retain(|pending| match pending.try_take() {
            Some(result) => {
                results.push(result);
                false
            }
            None => true,
        });

        let delivered = !results.is_empty();
        for result in results {
            self.apply_configuration(result);
        }
        delivered
    }

    fn apply_configuration(&mut self, result: FetchResult) {
        match result {
            Ok(players) => {
                info!(
                    player_a = %players.player_a().name,
                    player_b = %players.player_b().name,
                    "players configured"
                );
                self.sink
                    .on_players_ready(players.player_a(), players.player_b());
                self.players = Some(players);
            }
            Err(e) => {
                warn!(error = %e, "player configuration unavailable");
                self.sink.on_configuration_error(&e);
            }
        }
    }

    /// Drop a counter into the column of the selected cell.
    pub fn select_cell(&mut self, cell: PresentationPosition) -> Result<MoveOutcome, MoveError> {
        self.make_move(cell.column)
    }

    /// Drop the current player's counter into `column`.
    pub fn make_move(&mut self, column: usize) -> Result<MoveOutcome, MoveError> {
        if self.phase != GamePhase::InProgress {
            return Err(MoveError::NotInProgress);
        }
        if column >= MAX_COLUMNS {
            return Err(MoveError::InvalidColumn(column));
        }
        if self.board.is_column_full(column) {
            warn!(column, "move into full column ignored");
            return Ok(MoveOutcome::Ignored);
        }

        let landing = Position::new(column, self.board.column_height(column));
        let state = self.current_player.counter_state();
        self.turns_taken += 1;
        self.board.add(column, Counter::new(state));
        debug!(
            column,
            row = landing.row,
            player = ?self.current_player,
            turn = self.turns_taken,
            "counter placed"
        );
        self.sink.on_cell_changed(to_presentation(landing), state);

        let lines = self.board.winning_lines(landing, state);
        if !lines.is_empty() {
            return Ok(self.handle_win(landing, state, &lines));
        }

        if self.turns_taken >= MAX_COLUMNS * MAX_ROWS {
            return Ok(self.handle_draw());
        }

        self.current_player = self.current_player.other();
        let message = format!("{}, it's your turn", self.player_name(self.current_player));
        self.sink.on_status_message(&message);
        Ok(MoveOutcome::Continue {
            next: self.current_player,
        })
    }

    /// Abandon the current game.
    pub fn end_game(&mut self) {
        self.finish();
        info!("game ended");
        self.sink.on_board_reset();
        self.sink.on_game_over();
    }

    fn handle_win(
        &mut self,
        landing: Position,
        state: CounterState,
        lines: &[Line],
    ) -> MoveOutcome {
        let winner = self.current_player;
        let cells = self.board.mark_winning(landing, state, lines);
        for &cell in &cells {
            self.sink
                .on_cell_changed(to_presentation(cell), CounterState::Winning);
        }

        let message = format!("{} wins!", self.player_name(winner));
        info!(?winner, ?lines, turns = self.turns_taken, "game won");
        self.sink.on_status_message(&message);

        self.finish();
        self.sink.on_game_over();
        MoveOutcome::Win { winner, cells }
    }

    fn handle_draw(&mut self) -> MoveOutcome {
        info!(turns = self.turns_taken, "game drawn");
        self.sink.on_status_message("It's a draw!");
        self.finish();
        self.sink.on_game_over();
        MoveOutcome::Draw
    }

    fn finish(&mut self) {
        self.reset();
        self.phase = GamePhase::GameOver;
    }

    fn reset(&mut self) {
        self.board = Board::new();
        self.turns_taken = 0;
        self.current_player = PlayerColor::PlayerA;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::StaticSource;
    use crate::error::FetchError;
    use crate::game::PlayerIdentity;
    use crate::presentation::{EventLog, SinkEvent};
    use std::cell::RefCell;
    use std::sync::mpsc;

    const A: CounterState = CounterState::PlayerA;
    const B: CounterState = CounterState::PlayerB;

    fn sue_and_henry() -> Players {
        Players::new(
            PlayerIdentity::new("Sue", "#FF0000"),
            PlayerIdentity::new("Henry", "#0000FF"),
        )
    }

    fn started() -> GameEngine<EventLog, StaticSource> {
        let mut engine = GameEngine::new(EventLog::new(), StaticSource::new(sue_and_henry()));
        engine.start_game();
        engine.sink_mut().drain();
        engine
    }

    fn seed(
        engine: &mut GameEngine<EventLog, StaticSource>,
        column: usize,
        states: &[CounterState],
    ) {
        for &state in states {
            engine.board.add(column, Counter::new(state));
        }
    }

    fn play(engine: &mut GameEngine<EventLog, StaticSource>, columns: &[usize]) -> MoveOutcome {
        let mut last = MoveOutcome::Ignored;
        for &column in columns {
            last = engine.make_move(column).unwrap();
        }
        last
    }

    fn assert_reset(engine: &GameEngine<EventLog, StaticSource>) {
        assert_eq!(engine.turns_taken(), 0);
        assert_eq!(engine.current_player(), PlayerColor::PlayerA);
        for column in 0..MAX_COLUMNS {
            assert_eq!(engine.board().column_height(column), 0);
        }
    }

    struct FailingSource;

    impl ConfigurationSource for FailingSource {
        fn fetch_configuration(&self) -> PendingConfiguration {
            PendingConfiguration::ready(Err(FetchError::EmptyPayload))
        }
    }

    /// Hands each fetch's sender to the test so it controls completion.
    #[derive(Default)]
    struct ManualSource {
        senders: RefCell<Vec<mpsc::Sender<FetchResult>>>,
    }

    impl ConfigurationSource for ManualSource {
        fn fetch_configuration(&self) -> PendingConfiguration {
            let (tx, pending) = PendingConfiguration::channel();
            self.senders.borrow_mut().push(tx);
            pending
        }
    }

    #[test]
    fn test_new_engine_is_not_started() {
        let mut engine = GameEngine::new(EventLog::new(), StaticSource::new(sue_and_henry()));
        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert_eq!(engine.make_move(0), Err(MoveError::NotInProgress));
        assert!(engine.sink().events().is_empty());
    }

    #[test]
    fn test_start_game() {
        let mut engine = GameEngine::new(EventLog::new(), StaticSource::new(sue_and_henry()));
        engine.start_game();

        assert_eq!(engine.phase(), GamePhase::InProgress);
        assert_eq!(engine.board().columns().len(), MAX_COLUMNS);
        assert_reset(&engine);
        assert_eq!(engine.players(), Some(&sue_and_henry()));
        assert!(!engine.is_fetching());
        assert_eq!(
            engine.sink().events(),
            &[
                SinkEvent::BoardReset,
                SinkEvent::PlayersReady {
                    player_a: PlayerIdentity::new("Sue", "#FF0000"),
                    player_b: PlayerIdentity::new("Henry", "#0000FF"),
                },
            ]
        );
    }

    #[test]
    fn test_counter_lands_on_top_of_column() {
        let mut engine = started();
        engine.make_move(2).unwrap();
        engine.make_move(2).unwrap();

        let height_before = engine.board().column_height(2);
        engine.make_move(2).unwrap();

        assert_eq!(engine.board().column_height(2), height_before + 1);
        assert_eq!(engine.board().status_at(Position::new(2, height_before)), A);
        assert_eq!(engine.turns_taken(), 3);
        assert!(engine.sink().contains(&SinkEvent::CellChanged {
            cell: PresentationPosition::new(MAX_ROWS - 1 - height_before, 2),
            state: A,
        }));
    }

    #[test]
    fn test_select_cell_uses_only_the_column() {
        let mut engine = started();
        engine.select_cell(PresentationPosition::new(0, 4)).unwrap();

        assert_eq!(engine.board().status_at(Position::new(4, 0)), A);
        assert_eq!(
            engine.sink().events()[0],
            SinkEvent::CellChanged {
                cell: PresentationPosition::new(5, 4),
                state: A,
            }
        );
    }

    #[test]
    fn test_turn_message_names_next_player() {
        let mut engine = started();

        let outcome = engine.make_move(3).unwrap();
        assert_eq!(outcome, MoveOutcome::Continue { next: PlayerColor::PlayerB });
        assert_eq!(engine.sink().last_message(), Some("Henry, it's your turn"));

        let outcome = engine.make_move(3).unwrap();
        assert_eq!(outcome, MoveOutcome::Continue { next: PlayerColor::PlayerA });
        assert_eq!(engine.sink().last_message(), Some("Sue, it's your turn"));
    }

    #[test]
    fn test_horizontal_win() {
        let mut engine = started();
        seed(&mut engine, 0, &[A]);
        seed(&mut engine, 1, &[A]);
        seed(&mut engine, 2, &[A]);

        let outcome = engine.make_move(3).unwrap();

        let MoveOutcome::Win { winner, cells } = outcome else {
            panic!("expected a win");
        };
        assert_eq!(winner, PlayerColor::PlayerA);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], Position::new(3, 0));
        for column in 0..4 {
            assert!(cells.contains(&Position::new(column, 0)));
            assert!(engine.sink().contains(&SinkEvent::CellChanged {
                cell: PresentationPosition::new(5, column),
                state: CounterState::Winning,
            }));
        }
        assert_eq!(engine.sink().last_message(), Some("Sue wins!"));
        assert_eq!(engine.sink().events().last(), Some(&SinkEvent::GameOver));
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_reset(&engine);
    }

    #[test]
    fn test_vertical_win() {
        let mut engine = started();
        seed(&mut engine, 0, &[A, A, A]);

        let outcome = engine.make_move(0).unwrap();

        let MoveOutcome::Win { cells, .. } = outcome else {
            panic!("expected a win");
        };
        let mut rows: Vec<usize> = cells.iter().map(|p| p.row).collect();
        rows.sort_unstable();
        assert_eq!(rows, vec![0, 1, 2, 3]);
        assert!(cells.iter().all(|p| p.column == 0));
        assert_eq!(engine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_rising_diagonal_win() {
        let mut engine = started();
        seed(&mut engine, 0, &[A]);
        seed(&mut engine, 1, &[B, A]);
        seed(&mut engine, 2, &[B, A, A]);
        seed(&mut engine, 3, &[B, A, B]);

        let outcome = engine.make_move(3).unwrap();

        let MoveOutcome::Win { cells, .. } = outcome else {
            panic!("expected a win");
        };
        assert_eq!(cells.len(), 4);
        for step in 0..4 {
            assert!(cells.contains(&Position::new(step, step)));
        }
    }

    #[test]
    fn test_falling_diagonal_win() {
        let mut engine = started();
        seed(&mut engine, 3, &[A]);
        seed(&mut engine, 2, &[B, A]);
        seed(&mut engine, 1, &[A, B, A]);
        seed(&mut engine, 0, &[B, A, B]);

        let outcome = engine.make_move(0).unwrap();

        let MoveOutcome::Win { cells, .. } = outcome else {
            panic!("expected a win");
        };
        assert_eq!(cells.len(), 4);
        for step in 0..4 {
            assert!(cells.contains(&Position::new(step, 3 - step)));
        }
    }

    #[test]
    fn test_win_through_play_names_the_mover() {
        let mut engine = started();
        // B stacks column 1 while A scatters.
        let outcome = play(&mut engine, &[0, 1, 0, 1, 0, 1, 6, 1]);

        assert!(matches!(
            outcome,
            MoveOutcome::Win {
                winner: PlayerColor::PlayerB,
                ..
            }
        ));
        assert_eq!(engine.sink().last_message(), Some("Henry wins!"));
    }

    #[test]
    fn test_no_false_win() {
        let mut engine = started();
        // A holds columns 0-2 on the floor, B blocks column 3.
        let outcome = play(&mut engine, &[0, 6, 1, 6, 2]);
        assert_eq!(outcome, MoveOutcome::Continue { next: PlayerColor::PlayerB });

        let outcome = play(&mut engine, &[3, 4]);
        assert_eq!(outcome, MoveOutcome::Continue { next: PlayerColor::PlayerB });
        assert_eq!(engine.phase(), GamePhase::InProgress);

        // Floor row reads A A . A after the last move.
        let mut engine = started();
        let outcome = play(&mut engine, &[0, 0, 1, 1, 3]);
        assert_eq!(outcome, MoveOutcome::Continue { next: PlayerColor::PlayerB });
    }

    #[test]
    fn test_draw() {
        let mut engine = started();
        // Rows alternate AABBAAB / BBAABBA; no line longer than two.
        let row_order = [0, 2, 1, 3, 4, 6, 5];
        let mut last = MoveOutcome::Ignored;
        for _ in 0..MAX_ROWS {
            for &column in &row_order {
                assert_eq!(engine.phase(), GamePhase::InProgress);
                last = engine.make_move(column).unwrap();
            }
        }

        assert_eq!(last, MoveOutcome::Draw);
        assert_eq!(engine.sink().last_message(), Some("It's a draw!"));
        assert!(!engine
            .sink()
            .events()
            .iter()
            .any(|e| matches!(e, SinkEvent::StatusMessage(text) if text.ends_with("wins!"))));
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_reset(&engine);
    }

    #[test]
    fn test_full_column_is_ignored() {
        let mut engine = started();
        play(&mut engine, &[0, 0, 0, 0, 0, 0]);
        assert!(engine.board().is_column_full(0));
        engine.sink_mut().drain();

        assert_eq!(engine.make_move(0), Ok(MoveOutcome::Ignored));
        assert_eq!(engine.turns_taken(), MAX_ROWS);
        assert_eq!(engine.current_player(), PlayerColor::PlayerA);
        assert!(engine.sink().events().is_empty());
    }

    #[test]
    fn test_invalid_column() {
        let mut engine = started();
        assert_eq!(engine.make_move(MAX_COLUMNS), Err(MoveError::InvalidColumn(MAX_COLUMNS)));
        assert_eq!(engine.turns_taken(), 0);
    }

    #[test]
    fn test_move_after_game_over_is_rejected() {
        let mut engine = started();
        engine.end_game();
        assert_eq!(engine.make_move(0), Err(MoveError::NotInProgress));
    }

    #[test]
    fn test_end_game_is_idempotent() {
        let mut engine = started();
        play(&mut engine, &[0, 1, 2]);

        engine.end_game();
        engine.end_game();

        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_reset(&engine);
        assert_eq!(
            engine.sink().events().last(),
            Some(&SinkEvent::GameOver)
        );
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = started();
        engine.end_game();
        engine.start_game();

        assert_eq!(engine.phase(), GamePhase::InProgress);
        assert!(engine.make_move(3).is_ok());
    }

    #[test]
    fn test_configuration_error_keeps_game_playable() {
        let mut engine = GameEngine::new(EventLog::new(), FailingSource);
        engine.start_game();

        assert_eq!(engine.phase(), GamePhase::InProgress);
        assert!(engine.players().is_none());
        assert!(engine.sink().contains(&SinkEvent::ConfigurationError(
            FetchError::EmptyPayload.to_string()
        )));

        engine.make_move(0).unwrap();
        assert_eq!(engine.sink().last_message(), Some("Player 2, it's your turn"));
    }

    #[test]
    fn test_configuration_arrives_later() {
        let mut engine = GameEngine::new(EventLog::new(), ManualSource::default());
        engine.start_game();
        assert!(engine.is_fetching());
        assert!(!engine.poll_configuration());

        engine.make_move(0).unwrap();
        assert_eq!(engine.sink().last_message(), Some("Player 2, it's your turn"));

        engine.source.senders.borrow()[0]
            .send(Ok(sue_and_henry()))
            .unwrap();
        assert!(engine.poll_configuration());
        assert!(!engine.is_fetching());
        assert_eq!(engine.players(), Some(&sue_and_henry()));

        engine.make_move(0).unwrap();
        assert_eq!(engine.sink().last_message(), Some("Sue, it's your turn"));
    }

    #[test]
    fn test_configuration_after_end_game_still_applies() {
        let mut engine = GameEngine::new(EventLog::new(), ManualSource::default());
        engine.start_game();
        engine.end_game();

        engine.source.senders.borrow()[0]
            .send(Ok(sue_and_henry()))
            .unwrap();
        assert!(engine.poll_configuration());
        assert_eq!(engine.players(), Some(&sue_and_henry()));
    }

    #[test]
    fn test_restart_keeps_earlier_fetch_outstanding() {
        let mut engine = GameEngine::new(EventLog::new(), ManualSource::default());
        engine.start_game();
        engine.start_game();
        engine.sink_mut().drain();

        engine.source.senders.borrow()[0]
            .send(Ok(sue_and_henry()))
            .unwrap();
        engine.source.senders.borrow()[1]
            .send(Err(FetchError::EmptyPayload))
            .unwrap();

        assert!(engine.poll_configuration());
        assert!(!engine.is_fetching());
        assert!(!engine.poll_configuration());

        // Both fetches report, oldest first; the failure leaves players intact.
        assert_eq!(engine.players(), Some(&sue_and_henry()));
        assert!(matches!(
            engine.sink().events(),
            [SinkEvent::PlayersReady { .. }, SinkEvent::ConfigurationError(_)]
        ));
    }

    #[test]
    fn test_earlier_fetch_finishing_last_still_applies() {
        let mut engine = GameEngine::new(EventLog::new(), ManualSource::default());
        engine.start_game();
        engine.start_game();

        engine.source.senders.borrow()[1]
            .send(Err(FetchError::EmptyPayload))
            .unwrap();
        assert!(engine.poll_configuration());
        assert!(engine.is_fetching());

        engine.source.senders.borrow()[0]
            .send(Ok(sue_and_henry()))
            .unwrap();
        assert!(engine.poll_configuration());
        assert!(!engine.is_fetching());
        assert_eq!(engine.players(), Some(&sue_and_henry()));
    }
}
