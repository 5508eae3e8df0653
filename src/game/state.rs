use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use super::{Board, Player, Position, Scores, BOARD_SIZE};
use crate::ai::Agent;

/// Who controls White. Black is always a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameMode {
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    #[serde(rename = "pvc")]
    PlayerVsComputer,
}

impl GameMode {
    pub fn toggled(self) -> GameMode {
        match self {
            GameMode::PlayerVsPlayer => GameMode::PlayerVsComputer,
            GameMode::PlayerVsComputer => GameMode::PlayerVsPlayer,
        }
    }

    /// Whether `player` is driven by the computer in this mode
    pub fn is_computer(self, player: Player) -> bool {
        self == GameMode::PlayerVsComputer && player == Player::White
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::PlayerVsPlayer => write!(f, "Player vs Player"),
            GameMode::PlayerVsComputer => write!(f, "Player vs Computer"),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pvp" => Ok(GameMode::PlayerVsPlayer),
            "pvc" => Ok(GameMode::PlayerVsComputer),
            other => Err(format!("unknown mode '{other}' (expected 'pvp' or 'pvc')")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRules {
    pub board_size: usize,
    /// Round wins that end the match (2 = best of three)
    pub wins_needed: u32,
    /// Optional cap on rounds played, drawn rounds included
    pub round_limit: Option<u32>,
}

impl Default for MatchRules {
    fn default() -> Self {
        MatchRules {
            board_size: BOARD_SIZE,
            wins_needed: 2,
            round_limit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Player),
    /// Round limit hit with equal scores
    Tied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    RoundOver(RoundOutcome),
    MatchOver(MatchOutcome),
}

/// Result of a placement request. Invalid requests are `Ignored`, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Ignored,
    Continue {
        next: Player,
        opponent_to_move: bool,
    },
    RoundWon(Player),
    RoundDrawn,
}

/// Board, turn and score state for a whole match.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    mode: GameMode,
    rules: MatchRules,
    active_player: Player,
    round: u32,
    scores: Scores,
    phase: Phase,
    last_move: Option<Position>,
}

impl GameState {
    pub fn new(mode: GameMode, rules: MatchRules) -> Self {
        GameState {
            board: Board::new(rules.board_size),
            mode,
            rules,
            active_player: Player::Black, // Black starts every round
            round: 0,
            scores: Scores::default(),
            phase: Phase::InProgress,
            last_move: None,
        }
    }

    /// Standard 15×15 best-of-three match
    pub fn initial(mode: GameMode) -> Self {
        Self::new(mode, MatchRules::default())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Zero-based index of the current round
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// True whenever placements are not accepted (round or match finished)
    pub fn is_game_over(&self) -> bool {
        self.phase != Phase::InProgress
    }

    pub fn is_match_over(&self) -> bool {
        matches!(self.phase, Phase::MatchOver(_))
    }

    pub fn match_outcome(&self) -> Option<MatchOutcome> {
        match self.phase {
            Phase::MatchOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Whether the computer should move next
    pub fn is_opponent_turn(&self) -> bool {
        self.phase == Phase::InProgress && self.mode.is_computer(self.active_player)
    }

    /// Place a stone for the active player.
    pub fn place_piece(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.is_game_over() {
            return MoveOutcome::Ignored;
        }
        let player = self.active_player;
        if self.board.place(row, col, player.to_cell()).is_err() {
            return MoveOutcome::Ignored;
        }
        self.last_move = Some(Position::new(row, col));
        debug!(player = player.name(), row, col, "stone placed");

        if self.board.check_win(row, col) {
            self.scores.increment(player);
            self.phase = Phase::RoundOver(RoundOutcome::Winner(player));
            info!(
                round = self.round + 1,
                winner = player.name(),
                black = self.scores.get(Player::Black),
                white = self.scores.get(Player::White),
                "round won"
            );
            return MoveOutcome::RoundWon(player);
        }

        if self.board.is_full() {
            self.phase = Phase::RoundOver(RoundOutcome::Draw);
            info!(round = self.round + 1, "round drawn");
            return MoveOutcome::RoundDrawn;
        }

        self.active_player = player.other();
        MoveOutcome::Continue {
            next: self.active_player,
            opponent_to_move: self.is_opponent_turn(),
        }
    }

    /// Let the computer opponent move, if it is its turn.
    pub fn play_opponent(&mut self, agent: &mut dyn Agent) -> MoveOutcome {
        if !self.is_opponent_turn() {
            return MoveOutcome::Ignored;
        }
        match agent.select_move(&self.board) {
            Some(pos) => {
                debug!(agent = agent.name(), row = pos.row, col = pos.col, "opponent chose");
                self.place_piece(pos.row, pos.col)
            }
            None => MoveOutcome::Ignored,
        }
    }

    /// Leave a finished round: end the match or start the next round.
    /// Does nothing unless the current round is over.
    pub fn advance_round(&mut self) -> Phase {
        if !matches!(self.phase, Phase::RoundOver(_)) {
            return self.phase;
        }

        if let Some(outcome) = self.decided_outcome() {
            self.phase = Phase::MatchOver(outcome);
            info!(outcome = ?outcome, rounds = self.round + 1, "match over");
            return self.phase;
        }

        self.round += 1;
        self.board = Board::new(self.rules.board_size);
        self.active_player = Player::Black;
        self.last_move = None;
        self.phase = Phase::InProgress;
        debug!(round = self.round + 1, "next round");
        self.phase
    }

    /// Start a fresh match with the same mode and rules
    pub fn reset_match(&mut self) {
        *self = GameState::new(self.mode, self.rules);
    }

    /// Switch who controls White; resets the match
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset_match();
    }

    fn decided_outcome(&self) -> Option<MatchOutcome> {
        if let Some(player) = self.scores.reached(self.rules.wins_needed) {
            return Some(MatchOutcome::Winner(player));
        }
        let played = self.round + 1;
        match self.rules.round_limit {
            Some(limit) if played >= limit => Some(match self.scores.leader() {
                Some(player) => MatchOutcome::Winner(player),
                None => MatchOutcome::Tied,
            }),
            _ => None,
        }
    }
}
