//! Turn orchestration for a local two-player game.
//!
//! All phase and turn information lives in one [`TurnState`] value; there are
//! no separate "started" or "whose turn" flags to drift out of sync across a
//! restart.

use alloc::string::String;

use log::info;
use rand::Rng;

use crate::ai::{Shot, TargetingAgent};
use crate::board::Board;
use crate::common::{AttackReport, GameError};
use crate::config::{BoardConfig, FLEET};
use crate::fleet::place_fleet_randomly;
use crate::ship::ShipSpec;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Single-player pits `Player::One` against the computer in seat two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    SinglePlayer,
    Multiplayer,
}

/// Phase and turn of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnState {
    /// Ships are being placed; no attacks yet.
    Setup,
    Player1Turn,
    Player2Turn,
    Finished { winner: Player, forfeit: bool },
}

impl TurnState {
    /// State at the start of play.
    pub fn first_turn() -> Self {
        TurnState::Player1Turn
    }

    fn turn_of(player: Player) -> Self {
        match player {
            Player::One => TurnState::Player1Turn,
            Player::Two => TurnState::Player2Turn,
        }
    }

    /// The player whose turn it is, if play is under way.
    pub fn current(&self) -> Option<Player> {
        match self {
            TurnState::Player1Turn => Some(Player::One),
            TurnState::Player2Turn => Some(Player::Two),
            TurnState::Setup | TurnState::Finished { .. } => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            TurnState::Finished { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TurnState::Finished { .. })
    }

    /// Transition after the current player's attack. An `AlreadyAttacked`
    /// report keeps the turn; a resolved attack either finishes the game, if
    /// the defender's fleet is sunk, or passes the turn.
    pub fn after_attack(self, report: &AttackReport, defender_defeated: bool) -> Self {
        let Some(attacker) = self.current() else {
            return self;
        };
        if !report.is_resolved() {
            self
        } else if defender_defeated {
            TurnState::Finished {
                winner: attacker,
                forfeit: false,
            }
        } else {
            TurnState::turn_of(attacker.opponent())
        }
    }

    /// Transition when `forfeiting` gives up.
    pub fn after_forfeit(self, forfeiting: Player) -> Self {
        TurnState::Finished {
            winner: forfeiting.opponent(),
            forfeit: true,
        }
    }
}

/// A local game: two boards, the turn state, and the computer's search state
/// in single-player mode.
#[derive(Debug, Clone)]
pub struct Game {
    mode: GameMode,
    names: [String; 2],
    boards: [Board; 2],
    fleet: &'static [ShipSpec],
    state: TurnState,
    agent: TargetingAgent,
}

impl Game {
    /// Standard boards and the canonical fleet.
    pub fn new(mode: GameMode) -> Self {
        Self::with_config(mode, BoardConfig::standard(), &FLEET)
    }

    pub fn with_config(mode: GameMode, config: BoardConfig, fleet: &'static [ShipSpec]) -> Self {
        let second = match mode {
            GameMode::SinglePlayer => "Computer",
            GameMode::Multiplayer => "Player 2",
        };
        Self {
            mode,
            names: [String::from("Player 1"), String::from(second)],
            boards: [Board::new(config), Board::new(config)],
            fleet,
            state: TurnState::Setup,
            agent: TargetingAgent::new(),
        }
    }

    /// Rename a player. Blank names keep the default.
    pub fn set_name(&mut self, player: Player, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.names[player.index()] = String::from(name);
        }
    }

    pub fn name(&self, player: Player) -> &str {
        &self.names[player.index()]
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn fleet(&self) -> &'static [ShipSpec] {
        self.fleet
    }

    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }

    /// Mutable access to a board for ship placement. Only available during
    /// setup.
    pub fn board_mut(&mut self, player: Player) -> Result<&mut Board, GameError> {
        if self.state != TurnState::Setup {
            return Err(GameError::AlreadyStarted);
        }
        Ok(&mut self.boards[player.index()])
    }

    /// Randomly deploy the whole fleet for `player`. Generator failures are
    /// passed through as [`GameError::Fleet`].
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        player: Player,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let fleet = self.fleet;
        let board = self.board_mut(player)?;
        place_fleet_randomly(board, fleet, rng)?;
        Ok(())
    }

    /// Begin play once both fleets are complete. Player one moves first.
    pub fn start(&mut self) -> Result<TurnState, GameError> {
        match self.state {
            TurnState::Setup => {}
            TurnState::Finished { .. } => return Err(GameError::Finished),
            _ => return Err(GameError::AlreadyStarted),
        }
        for player in [Player::One, Player::Two] {
            if !self.board(player).is_fleet_complete(self.fleet) {
                return Err(GameError::FleetIncomplete(player));
            }
        }
        self.state = TurnState::first_turn();
        info!("game started, {} to move", self.name(Player::One));
        Ok(self.state)
    }

    fn require_turn(&self) -> Result<Player, GameError> {
        match self.state {
            TurnState::Setup => Err(GameError::NotStarted),
            TurnState::Finished { .. } => Err(GameError::Finished),
            TurnState::Player1Turn => Ok(Player::One),
            TurnState::Player2Turn => Ok(Player::Two),
        }
    }

    fn resolve(
        &mut self,
        attacker: Player,
        row: usize,
        col: usize,
    ) -> Result<AttackReport, GameError> {
        let defender = &mut self.boards[attacker.opponent().index()];
        let report = defender.receive_attack(row, col)?;
        let defeated = defender.all_ships_sunk();
        self.state = self.state.after_attack(&report, defeated);
        if let Some(winner) = self.state.winner() {
            info!("{} wins", self.name(winner));
        }
        Ok(report)
    }

    /// Attack (`row`, `col`) on the opponent's board as the current human
    /// player. An `AlreadyAttacked` report leaves the turn unchanged.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackReport, GameError> {
        let attacker = self.require_turn()?;
        if self.mode == GameMode::SinglePlayer && attacker == Player::Two {
            return Err(GameError::ComputerTurn);
        }
        self.resolve(attacker, row, col)
    }

    /// Let the computer take its turn in single-player mode.
    pub fn play_computer_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Shot, GameError> {
        let attacker = self.require_turn()?;
        if self.mode != GameMode::SinglePlayer || attacker != Player::Two {
            return Err(GameError::NotComputerTurn);
        }
        let target = &mut self.boards[Player::One.index()];
        let shot = self.agent.take_turn(target, rng)?;
        let defeated = target.all_ships_sunk();
        self.state = self.state.after_attack(&shot.report, defeated);
        if let Some(winner) = self.state.winner() {
            info!("{} wins", self.name(winner));
        }
        Ok(shot)
    }

    /// Concede on behalf of the player to move. In single-player mode only the
    /// human may forfeit, on their own turn. Returns the winner.
    pub fn forfeit(&mut self) -> Result<Player, GameError> {
        let forfeiting = self.require_turn()?;
        if self.mode == GameMode::SinglePlayer && forfeiting != Player::One {
            return Err(GameError::ForfeitNotAllowed);
        }
        self.state = self.state.after_forfeit(forfeiting);
        let winner = forfeiting.opponent();
        info!("{} forfeits, {} wins", self.name(forfeiting), self.name(winner));
        Ok(winner)
    }

    /// Clear both boards and the computer's search state and return to setup.
    pub fn restart(&mut self) {
        for board in self.boards.iter_mut() {
            board.reset_board();
        }
        self.agent.reset();
        self.state = TurnState::Setup;
    }
}
