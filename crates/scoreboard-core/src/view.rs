use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::player::RankedRecord;

/// Which name to show for a player who has a nickname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameDisplay {
    RealName,
    Nickname,
}

impl NameDisplay {
    /// Wire value used by the update-score endpoint (`0` real name,
    /// `1` nickname).
    pub fn display_type(self) -> u8 {
        match self {
            NameDisplay::RealName => 0,
            NameDisplay::Nickname => 1,
        }
    }
}

/// Per-player name display choices for one screen. Players without an
/// entry show their nickname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePreferences {
    prefs: HashMap<String, NameDisplay>,
}

impl NamePreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> NameDisplay {
        self.prefs
            .get(name)
            .copied()
            .unwrap_or(NameDisplay::Nickname)
    }

    pub fn shows_real_name(&self, name: &str) -> bool {
        self.get(name) == NameDisplay::RealName
    }

    /// Flip one player's display.
    ///
    /// Switching a player to their real name switches every other player
    /// back to their nickname: at most one real name is shown at a time.
    /// Returns the player's new setting.
    pub fn toggle(&mut self, name: &str) -> NameDisplay {
        if self.shows_real_name(name) {
            self.prefs.insert(name.to_string(), NameDisplay::Nickname);
            return NameDisplay::Nickname;
        }
        for pref in self.prefs.values_mut() {
            *pref = NameDisplay::Nickname;
        }
        self.prefs.insert(name.to_string(), NameDisplay::RealName);
        NameDisplay::RealName
    }

    pub fn reset(&mut self) {
        self.prefs.clear();
    }
}

/// One presented leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub entry: RankedRecord,
    /// Name to show, after applying [`NamePreferences`].
    pub display_name: String,
}

impl LeaderboardRow {
    pub fn has_nickname(&self) -> bool {
        self.entry.nickname().is_some()
    }
}

/// Nickname unless the player has none or is set to show the real name.
pub fn effective_name<'a>(record: &'a RankedRecord, prefs: &NamePreferences) -> &'a str {
    match record.nickname() {
        Some(nick) if !prefs.shows_real_name(record.name()) => nick,
        _ => record.name(),
    }
}

/// Case-insensitive substring match on name or nickname. A blank term
/// matches everything.
pub fn matches_search(record: &RankedRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    record.name().to_lowercase().contains(&term)
        || record
            .nickname()
            .is_some_and(|n| n.to_lowercase().contains(&term))
}

/// Filter ranked records by `term` and resolve each row's display name.
/// Ranking order is preserved.
pub fn present(ranked: &[RankedRecord], prefs: &NamePreferences, term: &str) -> Vec<LeaderboardRow> {
    ranked
        .iter()
        .filter(|r| matches_search(r, term))
        .map(|r| LeaderboardRow {
            display_name: effective_name(r, prefs).to_string(),
            entry: r.clone(),
        })
        .collect()
}
