use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Board, Coord2, GameConfig, GameError, PresetMineGenerator, RandomMineGenerator, Result,
    TileView,
};

/// Session-level outcome reported to the presentation layer. `Won` and
/// `Lost` are absorbing; a new session must be created to play again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Continuing,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Everything a single reveal changed, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub outcome: Outcome,
    /// Newly opened cells with their adjacency numbers.
    pub opened: Vec<(Coord2, u8)>,
    /// Every mine position; populated only on a loss, for display.
    pub exposed_mines: Vec<Coord2>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReport {
    pub outcome: Outcome,
    /// The target cell's flag state after the toggle.
    pub flagged: bool,
}

/// One playthrough: a board plus the configuration needed to recreate an
/// equivalent session on replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    outcome: Outcome,
}

impl GameSession {
    /// Starts a session with fresh random mine placement.
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Deterministic variant; the same seed reproduces the same layout.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_board(config, Board::generate(config, RandomMineGenerator::new(seed)))
    }

    /// Builds a session over an explicit mine layout (tests, scripted
    /// puzzles).
    pub fn with_mines(config: GameConfig, mines: &[Coord2]) -> Self {
        Self::from_board(config, Board::generate(config, PresetMineGenerator::new(mines)))
    }

    fn from_board(config: GameConfig, board: Board) -> Self {
        Self {
            config,
            board,
            outcome: Outcome::Continuing,
        }
    }

    /// Fresh session over the same configuration, new random layout.
    pub fn replay(&self) -> Self {
        Self::new(self.config)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    /// Flag-counter value a front end renders next to the board.
    pub fn mines_remaining(&self) -> i64 {
        self.board.flags_remaining()
    }

    /// Opens a cell. Hitting a mine loses the session and exposes every
    /// mine position for display; otherwise the report lists the opened
    /// region. Reveals alone never win: the win check runs on flag
    /// toggles.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        self.check_in_progress()?;

        let sweep = self.board.reveal(coords)?;
        if sweep.hit_mine {
            self.outcome = Outcome::Lost;
            log::debug!("mine hit at {coords:?}, session lost");
            return Ok(RevealReport {
                outcome: Outcome::Lost,
                opened: sweep.opened,
                exposed_mines: self.board.mine_coords(),
            });
        }

        Ok(RevealReport {
            outcome: Outcome::Continuing,
            opened: sweep.opened,
            exposed_mines: Vec::new(),
        })
    }

    /// Flips a flag and runs the termination check. The session is won
    /// only when every safe cell is already opened, the flag budget is
    /// exactly spent, and every mine holds a flag; a misplaced flag keeps
    /// the budget nonzero and blocks the win.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        self.check_in_progress()?;

        let flagged = self.board.toggle_flag(coords)?;
        if self.board.is_end_possible()
            && self.board.flags_remaining() == 0
            && self.board.all_mines_flagged()
        {
            self.outcome = Outcome::Won;
            log::debug!("all mines flagged, session won");
        }

        Ok(FlagReport {
            outcome: self.outcome,
            flagged,
        })
    }

    /// Read-only cell snapshot; the mine flag is withheld until the
    /// session ends.
    pub fn tile_view(&self, coords: Coord2) -> Result<TileView> {
        let tile = self.board.tile_at(coords)?;
        Ok(TileView {
            is_open: tile.is_open(),
            is_flagged: tile.is_flagged(),
            adjacent_mines: tile.adjacent_mines(),
            is_mine: self
                .outcome
                .is_terminal()
                .then(|| self.board.has_mine_at(coords)),
        })
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.outcome.is_terminal() {
            Err(GameError::SessionTerminal)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: u16, cols: u16, mines: &[Coord2]) -> GameSession {
        let config = GameConfig::new(rows, cols, mines.len() as u32).unwrap();
        GameSession::with_mines(config, mines)
    }

    /// Opens every non-mine cell one by one.
    fn open_safe_cells(session: &mut GameSession, mines: &[Coord2]) {
        let (rows, cols) = session.size();
        for row in 0..rows {
            for col in 0..cols {
                if mines.contains(&(row, col)) {
                    continue;
                }
                if !session.tile_view((row, col)).unwrap().is_open {
                    session.reveal((row, col)).unwrap();
                }
            }
        }
    }

    #[test]
    fn rejects_degenerate_configurations() {
        assert_eq!(GameConfig::new(1, 1, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 0, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 5, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 5, 25), Err(GameError::InvalidConfiguration));
        assert!(GameConfig::new(5, 5, 24).is_ok());
    }

    #[test]
    fn single_mine_board_opens_its_whole_safe_component() {
        let mut session = session(5, 5, &[(2, 2)]);

        assert_eq!(session.tile_view((1, 1)).unwrap().adjacent_mines, 1);
        assert_eq!(session.tile_view((0, 0)).unwrap().adjacent_mines, 0);

        let report = session.reveal((0, 0)).unwrap();

        assert_eq!(report.outcome, Outcome::Continuing);
        assert_eq!(report.opened.len(), 24);
        assert!(!session.tile_view((2, 2)).unwrap().is_open);
    }

    #[test]
    fn revealing_a_mine_loses_and_freezes_the_session() {
        let mut session = session(3, 3, &[(1, 1)]);

        let report = session.reveal((1, 1)).unwrap();
        assert_eq!(report.outcome, Outcome::Lost);
        assert_eq!(report.exposed_mines, vec![(1, 1)]);
        assert!(session.is_finished());

        assert_eq!(session.reveal((0, 0)), Err(GameError::SessionTerminal));
        assert_eq!(session.toggle_flag((0, 0)), Err(GameError::SessionTerminal));
    }

    #[test]
    fn repeated_reveal_of_an_open_cell_is_rejected_without_changes() {
        let mut session = session(3, 3, &[(0, 0)]);

        let first = session.reveal((2, 2)).unwrap();
        assert_eq!(first.opened, vec![((2, 2), 1)]);

        let before = session.clone();
        assert_eq!(session.reveal((2, 2)), Err(GameError::InvalidTargetState));
        assert_eq!(session, before);
    }

    #[test]
    fn flagging_every_mine_with_budget_spent_wins() {
        let mines = [(0, 0), (2, 2)];
        let mut session = session(3, 3, &mines);
        open_safe_cells(&mut session, &mines);

        let first = session.toggle_flag((0, 0)).unwrap();
        assert_eq!(first.outcome, Outcome::Continuing);

        let second = session.toggle_flag((2, 2)).unwrap();
        assert_eq!(second.outcome, Outcome::Won);
        assert!(session.is_finished());
        assert_eq!(session.reveal((1, 1)), Err(GameError::SessionTerminal));
    }

    #[test]
    fn misplaced_flag_blocks_the_win() {
        let mines = [(0, 0)];
        let mut session = session(2, 3, &mines);

        // A wrong flag keeps (1,2) closed and drives the budget negative.
        session.toggle_flag((1, 2)).unwrap();
        let report = session.toggle_flag((0, 0)).unwrap();
        assert_eq!(report.outcome, Outcome::Continuing);

        // Clearing the wrong flag restores the budget but the safe cell is
        // still closed, so the win stays blocked until it is opened and a
        // flag toggle re-runs the check.
        session.toggle_flag((1, 2)).unwrap();
        open_safe_cells(&mut session, &mines);
        assert_eq!(session.outcome(), Outcome::Continuing);

        session.toggle_flag((0, 0)).unwrap();
        let report = session.toggle_flag((0, 0)).unwrap();
        assert_eq!(report.outcome, Outcome::Won);
    }

    #[test]
    fn tile_view_withholds_mines_until_the_session_ends() {
        let mut session = session(3, 3, &[(1, 1)]);

        assert_eq!(session.tile_view((1, 1)).unwrap().is_mine, None);
        assert_eq!(session.tile_view((9, 9)), Err(GameError::OutOfBounds));

        session.reveal((1, 1)).unwrap();
        assert_eq!(session.tile_view((1, 1)).unwrap().is_mine, Some(true));
        assert_eq!(session.tile_view((0, 0)).unwrap().is_mine, Some(false));
    }

    #[test]
    fn flagging_an_open_cell_is_rejected() {
        let mut session = session(3, 3, &[(0, 0)]);
        session.reveal((2, 2)).unwrap();

        assert_eq!(session.toggle_flag((2, 2)), Err(GameError::InvalidTargetState));
    }

    #[test]
    fn replay_starts_fresh_with_the_same_configuration() {
        let config = GameConfig::new(4, 4, 3).unwrap();
        let mut session = GameSession::with_seed(config, 42);
        let _ = session.toggle_flag((0, 0));

        let replayed = session.replay();
        assert_eq!(replayed.config(), config);
        assert_eq!(replayed.outcome(), Outcome::Continuing);
        assert_eq!(replayed.board().mine_count(), 3);
        assert_eq!(replayed.mines_remaining(), 3);
    }

    #[test]
    fn session_snapshot_round_trips_through_serde() {
        let config = GameConfig::new(4, 4, 3).unwrap();
        let mut session = GameSession::with_seed(config, 9);
        session.toggle_flag((1, 1)).unwrap();

        let snapshot = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(restored, session);
    }
}
