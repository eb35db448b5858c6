//! Award-ceremony sequencing: top three per game, revealed third place
//! first, game by game.

use crate::format::format_score;
use crate::game::{GAMES, Game};
use crate::player::RankedRecord;
use crate::ranking::top_scored;

/// Number of podium places per game.
pub const PODIUM_PLACES: usize = 3;

/// One podium finisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub rank: u32,
    /// Nickname when the player has one, real name otherwise.
    pub name: String,
    pub score: u32,
}

impl Winner {
    pub fn score_text(&self, game: &Game) -> String {
        format_score(self.score, game.scoring_mode)
    }
}

/// Up to three winners for one game, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Podium {
    pub game: &'static Game,
    pub winners: Vec<Winner>,
}

impl Podium {
    /// Take the podium from an already ranked list. Unscored players never
    /// place.
    pub fn from_ranked(game: &'static Game, ranked: &[RankedRecord]) -> Self {
        let winners = top_scored(ranked, PODIUM_PLACES)
            .iter()
            .filter_map(|r| {
                Some(Winner {
                    rank: r.rank?,
                    name: r.nickname().unwrap_or(r.name()).to_string(),
                    score: r.score(),
                })
            })
            .collect();
        Self { game, winners }
    }

    pub fn empty(game: &'static Game) -> Self {
        Self {
            game,
            winners: Vec::new(),
        }
    }
}

/// Reveal state for the ceremony across every game in the catalog.
#[derive(Debug, Clone)]
pub struct Ceremony {
    podiums: Vec<Podium>,
    current: usize,
    /// Winners of the current game revealed so far (0..=3).
    revealed: usize,
    finished: Vec<bool>,
}

impl Default for Ceremony {
    fn default() -> Self {
        Self::new()
    }
}

impl Ceremony {
    /// A ceremony with an empty podium for each catalog game.
    pub fn new() -> Self {
        Self {
            podiums: GAMES.iter().map(Podium::empty).collect(),
            current: 0,
            revealed: 0,
            finished: vec![false; GAMES.len()],
        }
    }

    /// Replace podium data after a refresh. Reveal progress is kept; a game
    /// not present in `podiums` keeps its old data.
    pub fn replace_podiums(&mut self, podiums: Vec<Podium>) {
        for podium in podiums {
            if let Some(slot) = self.podiums.iter_mut().find(|p| p.game.id == podium.game.id) {
                *slot = podium;
            }
        }
        self.revealed = self.revealed.min(self.current_podium().winners.len());
    }

    pub fn current_podium(&self) -> &Podium {
        &self.podiums[self.current]
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Whether every winner of the current game is visible.
    pub fn current_complete(&self) -> bool {
        self.revealed >= self.current_podium().winners.len()
    }

    /// Reveal the next winner of the current game, lowest place first.
    /// Returns `None` once all of them are visible.
    pub fn reveal_next(&mut self) -> Option<&Winner> {
        let len = self.current_podium().winners.len();
        if self.revealed >= len {
            self.finished[self.current] = true;
            return None;
        }
        self.revealed += 1;
        if self.revealed == len {
            self.finished[self.current] = true;
        }
        self.podiums[self.current].winners.get(len - self.revealed)
    }

    /// Visible winners of the current game, best first.
    pub fn revealed_winners(&self) -> &[Winner] {
        let winners = &self.current_podium().winners;
        &winners[winners.len() - self.revealed..]
    }

    /// Move to the next game (wrapping) and hide its podium.
    pub fn advance(&mut self) -> &Podium {
        if self.current_complete() {
            self.finished[self.current] = true;
        }
        self.current = (self.current + 1) % self.podiums.len();
        self.revealed = 0;
        self.current_podium()
    }

    /// True once every game's podium has been fully revealed.
    pub fn all_revealed(&self) -> bool {
        self.finished.iter().all(|f| *f)
    }
}
