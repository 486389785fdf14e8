use serde::{Deserialize, Serialize};

/// Session phase.
///
/// Valid transitions:
/// - Welcome -> Playing
/// - Playing -> Win
/// - Playing -> Lose
/// - anything but End -> End
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Session created, no board interaction yet.
    Welcome,
    /// First reveal happened, mines are on the board.
    Playing,
    /// A mine was revealed; the whole board is visible.
    Lose,
    /// Every safe cell was revealed; the whole board is visible.
    Win,
    /// Player declined to continue.
    End,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Welcome)
    }

    /// Whether the board accepts no further mutation in this status.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Lose | Self::Win | Self::End)
    }

    /// The legal transition set; callers must ignore anything else.
    pub const fn can_transition(self, next: GameStatus) -> bool {
        use GameStatus::*;
        matches!(
            (self, next),
            (Welcome, Playing)
                | (Playing, Win)
                | (Playing, Lose)
                | (Welcome, End)
                | (Playing, End)
                | (Win, End)
                | (Lose, End)
        )
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Welcome
    }
}

#[cfg(test)]
mod tests {
    use super::GameStatus::*;

    #[test]
    fn only_the_documented_transitions_are_legal() {
        let all = [Welcome, Playing, Lose, Win, End];
        for from in all {
            for to in all {
                let legal = matches!(
                    (from, to),
                    (Welcome, Playing) | (Playing, Win | Lose) | (Welcome | Playing | Win | Lose, End)
                );
                assert_eq!(from.can_transition(to), legal, "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn terminal_statuses_are_final() {
        assert!(Welcome.is_initial());
        for status in [Lose, Win, End] {
            assert!(status.is_final());
        }
        assert!(!Playing.is_final());
        assert!(!Welcome.is_final());
    }
}
