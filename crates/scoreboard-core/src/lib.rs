pub mod api;
pub mod error;
pub mod format;
pub mod game;
pub mod player;
pub mod podium;
pub mod ranking;
pub mod roster;
pub mod screen;
pub mod view;

pub use error::ValidationError;
pub use format::{ScoreEntry, format_score, parse_score, parse_time};
pub use game::{GAMES, Game, ScoringMode, find_game};
pub use player::{PlayerScoreRecord, RankedRecord};
pub use ranking::assign_ranks;
pub use view::{NameDisplay, NamePreferences, present};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::player::PlayerScoreRecord;

    /// Records named `Player1..` with the given scores; every other player
    /// gets a nickname `Nick1`, `Nick3`, ...
    pub fn make_records(scores: &[u32]) -> Vec<PlayerScoreRecord> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let record = PlayerScoreRecord::new(format!("Player{}", i + 1), score)
                    .with_department("Test Dept");
                if i % 2 == 0 {
                    record.with_nickname(format!("Nick{}", i + 1))
                } else {
                    record
                }
            })
            .collect()
    }

    /// A full record set for one game: three scored players and one who has
    /// not played yet.
    pub fn sample_game_records() -> Vec<PlayerScoreRecord> {
        vec![
            PlayerScoreRecord::new("Wang", 30)
                .with_nickname("Alice")
                .with_department("CS"),
            PlayerScoreRecord::new("Lin", 65).with_department("EE"),
            PlayerScoreRecord::new("Chen", 30)
                .with_nickname("Bob")
                .with_department("ME"),
            PlayerScoreRecord::new("Huang", 0).with_department("CS"),
        ]
    }
}
