use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Initial -> Playing (first click)
/// - Initial -> Win (first click clears the whole board)
/// - Playing -> Win
/// - Playing -> Lose
/// - Initial -> Lose (forfeit)
/// - any -> Initial (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No mines placed yet
    Initial,
    /// Mines placed and at least one tile open
    Playing,
    /// Every safe tile is open
    Win,
    /// A mine was opened
    Lose,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Indicates the game has ended and the board is frozen
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Initial
    }
}

/// The state machine every move goes through.
///
/// Owns the current board snapshot and swaps it wholesale for the one returned by the engine, so a failed move leaves
/// the previous snapshot in place.
#[derive(Clone, Debug)]
pub struct GameController<G = RandomMineGenerator> {
    board: Board,
    state: GameState,
    generator: G,
}

impl GameController {
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RandomMineGenerator::seeded(seed))
    }
}

impl<G: MineGenerator> GameController<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        Self {
            board: Board::new(config),
            state: GameState::Initial,
            generator,
        }
    }

    /// Continues from an existing board, deriving the state from its tiles.
    ///
    /// A board with mines but nothing open yet is discarded for a fresh one of the same config, so the first click
    /// still goes through the generator and stays safe.
    pub fn resume(board: Board, generator: G) -> Self {
        if board.open_count() == 0 {
            if board.is_generated() {
                log::debug!("Resumed board has no open tile, mines will be placed on the first click");
            }
            return Self::new(board.config(), generator);
        }

        let state = if board.iter().any(|(_, tile)| {
            tile.is_mine() && tile.state() == TileState::Open
        }) {
            GameState::Lose
        } else if board.hidden_or_flagged() == board.mine_total() {
            GameState::Win
        } else {
            GameState::Playing
        };

        Self {
            board,
            state,
            generator,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Discards the board and starts over with the same config.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.config());
        self.set_state(GameState::Initial);
    }

    /// Starts over with a new config.
    pub fn reconfigure(&mut self, config: GameConfig) {
        self.board = Board::new(config);
        self.set_state(GameState::Initial);
    }

    /// Opens a tile. The first click of a game places the mines around it.
    pub fn click(&mut self, index: TileIndex) -> Result<RevealDelta> {
        let index = self.board.validate_index(index)?;

        let result = match self.state {
            GameState::Win | GameState::Lose => return Ok(RevealDelta::UNCHANGED),
            GameState::Initial => {
                let generated = self.generator.generate(&self.board, index)?;
                engine::open(&generated, index)?
            }
            GameState::Playing => engine::open(&self.board, index)?,
        };

        let delta = RevealDelta {
            outcome: result.outcome,
            opened: result.opened,
        };
        self.board = result.board;
        match delta.outcome {
            RevealOutcome::NoChange => {}
            RevealOutcome::Revealed => self.set_state(GameState::Playing),
            RevealOutcome::Won => self.set_state(GameState::Win),
            RevealOutcome::HitMine => self.set_state(GameState::Lose),
        }
        Ok(delta)
    }

    /// Toggles a flag. Only has an effect while playing.
    pub fn flag(&mut self, index: TileIndex) -> Result<MarkOutcome> {
        let index = self.board.validate_index(index)?;
        if self.state != GameState::Playing {
            return Ok(MarkOutcome::NoChange);
        }

        let result = engine::toggle_flag(&self.board, index)?;
        self.board = result.board;
        Ok(result.outcome)
    }

    /// Ends the game as a loss without a click, revealing mines if any were placed.
    pub fn forfeit(&mut self) {
        if self.state.is_finished() {
            return;
        }
        if self.board.is_generated() {
            let mut next = self.board.clone();
            engine::reveal_mines(&mut next);
            self.board = next;
        }
        self.set_state(GameState::Lose);
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::debug!("Game state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}
