use super::player::Player;

/// Round wins per player across a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    black: u32,
    white: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub fn increment(&mut self, player: Player) {
        match player {
            Player::Black => self.black += 1,
            Player::White => self.white += 1,
        }
    }

    /// The player with strictly more round wins, if any
    pub fn leader(&self) -> Option<Player> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The first player whose score has reached `wins_needed`
    pub fn reached(&self, wins_needed: u32) -> Option<Player> {
        [Player::Black, Player::White]
            .into_iter()
            .find(|&p| self.get(p) >= wins_needed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_start_at_zero() {
        let scores = Scores::default();
        assert_eq!(scores.get(Player::Black), 0);
        assert_eq!(scores.get(Player::White), 0);
        assert_eq!(scores.leader(), None);
        assert_eq!(scores.reached(1), None);
    }

    #[test]
    fn test_increment_and_threshold() {
        let mut scores = Scores::default();
        scores.increment(Player::White);
        assert_eq!(scores.leader(), Some(Player::White));
        assert_eq!(scores.reached(2), None);

        scores.increment(Player::White);
        assert_eq!(scores.reached(2), Some(Player::White));
        assert_eq!(scores.get(Player::Black), 0);
    }
}
