use serde::{Deserialize, Serialize};

/// Whether a higher score or a shorter elapsed time wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Higher is better.
    Points,
    /// Score is a duration in whole seconds; lower is better.
    ElapsedTimeSeconds,
}

impl ScoringMode {
    pub fn is_timed(self) -> bool {
        matches!(self, ScoringMode::ElapsedTimeSeconds)
    }
}

/// A catalog entry. The catalog is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub id: &'static str,
    pub display_name: &'static str,
    pub scoring_mode: ScoringMode,
}

/// The five games of the event, in display order.
pub static GAMES: [Game; 5] = [
    Game {
        id: "game_1",
        display_name: "Over-the-Shoulder Shot",
        scoring_mode: ScoringMode::Points,
    },
    Game {
        id: "game_2",
        display_name: "Thumbs Up",
        scoring_mode: ScoringMode::Points,
    },
    Game {
        id: "game_3",
        display_name: "Kitchen Blockade",
        scoring_mode: ScoringMode::Points,
    },
    Game {
        id: "game_4",
        display_name: "Speed Genius",
        scoring_mode: ScoringMode::ElapsedTimeSeconds,
    },
    Game {
        id: "game_5",
        display_name: "Go Master",
        scoring_mode: ScoringMode::ElapsedTimeSeconds,
    },
];

/// Look up a game by its id.
pub fn find_game(id: &str) -> Option<&'static Game> {
    GAMES.iter().find(|g| g.id == id)
}
