//! Round and match control
//!
//! A [`Round`] is one game on one board: players alternate until a line of K
//! is completed or the board fills up. A [`Match`] is a best-of-three series
//! of rounds on the same level. After a win the loser starts the next round;
//! after a draw the starting player alternates.

use tracing::{debug, info};

use crate::board::{Board, Player, Pos};
use crate::error::GameError;
use crate::level::{Level, MatchScore};
use crate::rng::RandomSource;
use crate::rules::{check_draw, check_win, WinLine};

/// State of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won(WinLine),
    Draw,
}

impl RoundStatus {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        match self {
            RoundStatus::Won(win) => Some(win.winner),
            _ => None,
        }
    }
}

/// One game on a fresh board.
#[derive(Debug, Clone)]
pub struct Round {
    level: Level,
    board: Board,
    starter: Player,
    to_move: Player,
    status: RoundStatus,
    history: Vec<(Player, Pos)>,
}

impl Round {
    /// Start a round on a new board with the level's obstacles placed at
    /// random.
    pub fn new<R: RandomSource + ?Sized>(
        level: Level,
        starter: Player,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let board = Board::with_obstacles(level.board_size, level.obstacles, rng)?;
        Ok(Self::with_board(level, board, starter))
    }

    /// Start a round on a prepared board.
    pub fn with_board(level: Level, board: Board, starter: Player) -> Self {
        Self {
            level,
            board,
            starter,
            to_move: starter,
            status: RoundStatus::InProgress,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn starter(&self) -> Player {
        self.starter
    }

    /// Player whose turn it is. Meaningless once the round is over.
    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[inline]
    pub fn status(&self) -> &RoundStatus {
        &self.status
    }

    /// Moves played so far, in order
    pub fn history(&self) -> &[(Player, Pos)] {
        &self.history
    }

    /// Play `pos` for the player to move.
    ///
    /// The move lands on a copy of the board; the round then checks for a
    /// win, then for a draw, and otherwise passes the turn.
    pub fn play(&mut self, pos: Pos) -> Result<&RoundStatus, GameError> {
        if self.status.is_over() {
            return Err(GameError::RoundOver);
        }
        match self.board.cell(pos) {
            None => return Err(GameError::OutOfBounds(pos)),
            Some(cell) if !cell.is_empty() => return Err(GameError::CellOccupied(pos)),
            Some(_) => {}
        }

        let player = self.to_move;
        self.board = self.board.with_move(pos, player);
        self.history.push((player, pos));

        if let Some(win) = check_win(&self.board, self.level.win_condition) {
            debug!(winner = %win.winner, line = ?win.line, "round won");
            self.status = RoundStatus::Won(win);
        } else if check_draw(&self.board) {
            debug!("round drawn");
            self.status = RoundStatus::Draw;
        } else {
            self.to_move = player.opponent();
        }
        Ok(&self.status)
    }
}

/// Best-of-three series on one level.
#[derive(Debug, Clone)]
pub struct Match {
    level: Level,
    score: MatchScore,
    round: Round,
    rounds_played: u32,
}

impl Match {
    /// New match; the first round starts with X.
    pub fn new<R: RandomSource + ?Sized>(level: Level, rng: &mut R) -> Result<Self, GameError> {
        let round = Round::new(level, Player::X, rng)?;
        Ok(Self {
            level,
            score: MatchScore::new(),
            round,
            rounds_played: 0,
        })
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn score(&self) -> &MatchScore {
        &self.score
    }

    #[inline]
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Rounds finished so far
    #[inline]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Play a move in the current round and record its result.
    pub fn play(&mut self, pos: Pos) -> Result<&RoundStatus, GameError> {
        if self.winner().is_some() {
            return Err(GameError::MatchOver);
        }
        let status = self.round.play(pos)?.clone();
        if status.is_over() {
            self.rounds_played += 1;
            if let Some(winner) = status.winner() {
                self.score.record_win(winner);
            }
            info!(score = %self.score, rounds = self.rounds_played, "round finished");
        }
        Ok(self.round.status())
    }

    /// Start the next round once the current one is over.
    ///
    /// The loser of the last round starts; after a draw the other player
    /// starts.
    pub fn next_round<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.winner().is_some() {
            return Err(GameError::MatchOver);
        }
        let starter = match self.round.status() {
            RoundStatus::InProgress => return Err(GameError::RoundInProgress),
            RoundStatus::Won(win) => win.winner.opponent(),
            RoundStatus::Draw => self.round.starter().opponent(),
        };
        self.round = Round::new(self.level, starter, rng)?;
        debug!(%starter, "next round");
        Ok(())
    }

    /// First player to reach the required round wins
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.score.match_winner()
    }

    /// Both players are one win away from the match
    #[inline]
    pub fn is_tie_breaker(&self) -> bool {
        self.score.is_tie_breaker()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;
    use crate::level::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_level(size: usize, k: usize) -> Level {
        Level::new(1, size, k, 0, Difficulty::Simple)
    }

    /// The starter takes the top row while the other player fills the second.
    fn starter_wins_round(m: &mut Match) {
        let starter = m.round().starter();
        let mut moves = Vec::new();
        for c in 0..3 {
            moves.push(Pos::new(0, c));
            moves.push(Pos::new(1, c));
        }
        for pos in moves {
            let status = m.play(pos).unwrap().clone();
            if status.is_over() {
                assert_eq!(status.winner(), Some(starter));
                return;
            }
        }
        panic!("round did not end");
    }

    #[test]
    fn test_round_new_places_obstacles() {
        let mut rng = StdRng::seed_from_u64(11);
        let level = Level::new(2, 6, 3, 4, Difficulty::Simple);
        let round = Round::new(level, Player::O, &mut rng).unwrap();
        assert_eq!(round.board().count(CellState::Obstacle), 4);
        assert_eq!(round.to_move(), Player::O);
        assert_eq!(round.status(), &RoundStatus::InProgress);
    }

    #[test]
    fn test_round_rejects_bad_moves() {
        let board: Board = "X . #\n. . .\n. . .".parse().unwrap();
        let mut round = Round::with_board(open_level(3, 3), board, Player::O);
        assert_eq!(round.play(Pos::new(3, 0)), Err(GameError::OutOfBounds(Pos::new(3, 0))));
        assert_eq!(round.play(Pos::new(0, 0)), Err(GameError::CellOccupied(Pos::new(0, 0))));
        assert_eq!(round.play(Pos::new(0, 2)), Err(GameError::CellOccupied(Pos::new(0, 2))));
        assert!(round.history().is_empty());
        assert_eq!(round.to_move(), Player::O);
    }

    #[test]
    fn test_round_alternates_and_detects_win() {
        let mut round = Round::with_board(open_level(4, 3), Board::new(4).unwrap(), Player::X);
        round.play(Pos::new(0, 0)).unwrap();
        assert_eq!(round.to_move(), Player::O);
        round.play(Pos::new(1, 0)).unwrap();
        round.play(Pos::new(0, 1)).unwrap();
        round.play(Pos::new(1, 1)).unwrap();
        let status = round.play(Pos::new(0, 2)).unwrap().clone();
        let RoundStatus::Won(win) = status else {
            panic!("expected a win, got {status:?}");
        };
        assert_eq!(win.winner, Player::X);
        assert_eq!(win.line, vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)]);
        assert_eq!(round.play(Pos::new(3, 3)), Err(GameError::RoundOver));
        assert_eq!(round.history().len(), 5);
    }

    #[test]
    fn test_round_draw() {
        // Last empty cell completes nothing
        let board: Board = "X O X\nX O O\nO X .".parse().unwrap();
        let mut round = Round::with_board(open_level(3, 3), board, Player::O);
        let status = round.play(Pos::new(2, 2)).unwrap();
        assert_eq!(status, &RoundStatus::Draw);
    }

    #[test]
    fn test_match_loser_starts_next_round() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut m = Match::new(open_level(4, 3), &mut rng).unwrap();
        assert_eq!(m.round().starter(), Player::X);

        assert_eq!(m.next_round(&mut rng), Err(GameError::RoundInProgress));

        starter_wins_round(&mut m);
        assert_eq!(m.score().x, 1);
        assert_eq!(m.rounds_played(), 1);

        m.next_round(&mut rng).unwrap();
        assert_eq!(m.round().starter(), Player::O);
        assert_eq!(m.round().to_move(), Player::O);
    }

    #[test]
    fn test_match_draw_alternates_starter() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut m = Match::new(open_level(3, 3), &mut rng).unwrap();
        // X O X / X O O / O X X with X starting: no line of three
        let moves = [
            Pos::new(0, 0),
            Pos::new(0, 1),
            Pos::new(0, 2),
            Pos::new(1, 1),
            Pos::new(1, 0),
            Pos::new(1, 2),
            Pos::new(2, 1),
            Pos::new(2, 0),
            Pos::new(2, 2),
        ];
        for pos in moves {
            m.play(pos).unwrap();
        }
        assert_eq!(m.round().status(), &RoundStatus::Draw);
        assert_eq!(m.score(), &MatchScore::new());

        m.next_round(&mut rng).unwrap();
        assert_eq!(m.round().starter(), Player::O);
    }

    #[test]
    fn test_match_ends_at_two_wins() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = Match::new(open_level(4, 3), &mut rng).unwrap();

        // Round 1: X starts and wins
        starter_wins_round(&mut m);
        // Round 2: O starts and wins
        m.next_round(&mut rng).unwrap();
        starter_wins_round(&mut m);
        assert!(m.is_tie_breaker());
        assert_eq!(m.winner(), None);

        // Round 3: X (loser of round 2) starts and wins
        m.next_round(&mut rng).unwrap();
        assert_eq!(m.round().starter(), Player::X);
        starter_wins_round(&mut m);

        assert_eq!(m.winner(), Some(Player::X));
        assert_eq!(m.score().to_string(), "X 2 - 1 O");
        assert_eq!(m.next_round(&mut rng), Err(GameError::MatchOver));
        assert_eq!(m.play(Pos::new(3, 3)), Err(GameError::MatchOver));
    }
}
