use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::*;

/// Offsets the agent's stream from the generator's when both come from one seed.
const AGENT_SEED_OFFSET: u64 = 0x9e37_79b9_7f4a_7c15;

/// State handed to collaborators after every operation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub board: &'a Board,
}

/// Receives the new state after every mutating session operation.
pub trait GameObserver {
    fn on_update(&mut self, state: GameState, board: &Board);
}

impl<F: FnMut(GameState, &Board)> GameObserver for F {
    fn on_update(&mut self, state: GameState, board: &Board) {
        self(state, board)
    }
}

/// Everything an outer layer (a UI, a CLI, a scheduler ticking the agent) talks to.
///
/// Only one actor drives a session at a time: while the agent is active, manual clicks and flags are ignored.
pub struct Session<G = RandomMineGenerator, R = SmallRng> {
    game: GameController<G>,
    agent: SolverAgent<R>,
    agent_active: bool,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Session {
    /// Session whose mine layouts and agent choices are all derived from `seed`.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(
            GameController::seeded(config, seed),
            SolverAgent::seeded(seed ^ AGENT_SEED_OFFSET),
        )
    }
}

impl<G: MineGenerator, R: rand::Rng> Session<G, R> {
    pub fn new(game: GameController<G>, agent: SolverAgent<R>) -> Self {
        Self {
            game,
            agent,
            agent_active: false,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.game.state(),
            board: self.game.board(),
        }
    }

    pub fn game(&self) -> &GameController<G> {
        &self.game
    }

    pub fn config(&self) -> GameConfig {
        self.game.config()
    }

    pub fn is_agent_active(&self) -> bool {
        self.agent_active
    }

    /// Validates and applies new board parameters, starting a fresh game. On error the current game is untouched.
    pub fn configure(
        &mut self,
        width: usize,
        height: usize,
        mines: usize,
    ) -> core::result::Result<GameConfig, ConfigError> {
        let config = configure(width, height, mines)?;
        self.agent_active = false;
        self.game.reconfigure(config);
        self.notify();
        Ok(config)
    }

    /// Back to a fully hidden board. Also halts the agent.
    pub fn reset(&mut self) -> Snapshot<'_> {
        if self.agent_active {
            log::debug!("Reset stops the agent");
        }
        self.agent_active = false;
        self.game.reset();
        self.notify();
        self.snapshot()
    }

    /// Manual click. Ignored while the agent is driving.
    pub fn click(&mut self, index: TileIndex) -> Result<(Snapshot<'_>, RevealDelta)> {
        let delta = if self.agent_active {
            self.game.board().validate_index(index)?;
            RevealDelta::UNCHANGED
        } else {
            self.game.click(index)?
        };
        if delta.has_update() {
            self.notify();
        }
        Ok((self.snapshot(), delta))
    }

    /// Manual flag toggle. Ignored while the agent is driving or outside of play.
    pub fn flag(&mut self, index: TileIndex) -> Result<(Snapshot<'_>, MarkOutcome)> {
        let outcome = if self.agent_active {
            self.game.board().validate_index(index)?;
            MarkOutcome::NoChange
        } else {
            self.game.flag(index)?
        };
        if outcome.has_update() {
            self.notify();
        }
        Ok((self.snapshot(), outcome))
    }

    /// Hands the board to the agent. Only allowed on a fresh board.
    pub fn start_agent(&mut self) -> bool {
        if !self.game.state().is_initial() {
            return false;
        }
        self.agent_active = true;
        true
    }

    pub fn stop_agent(&mut self) {
        self.agent_active = false;
    }

    /// One agent pass. Does nothing unless the agent was started, and deactivates it once the game ends.
    pub fn agent_step(&mut self) -> Result<(Snapshot<'_>, AgentMove)> {
        if !self.agent_active {
            return Ok((self.snapshot(), AgentMove::Idle));
        }

        let action = match self.agent.step(&mut self.game) {
            Ok(action) => action,
            Err(err) => {
                self.agent_active = false;
                return Err(err);
            }
        };
        if self.game.is_finished() {
            self.agent_active = false;
        }
        if !matches!(action, AgentMove::Idle) {
            self.notify();
        }
        Ok((self.snapshot(), action))
    }

    /// Calls [`agent_step`](Self::agent_step) until the game ends, the agent is stopped, or `max_steps` is reached.
    /// Returns the number of passes made.
    pub fn run_agent(&mut self, max_steps: usize) -> Result<usize> {
        let mut steps = 0;
        while self.agent_active && steps < max_steps {
            self.agent_step()?;
            steps += 1;
        }
        Ok(steps)
    }

    fn notify(&mut self) {
        let state = self.game.state();
        let board = self.game.board();
        for observer in &mut self.observers {
            observer.on_update(state, board);
        }
    }
}
