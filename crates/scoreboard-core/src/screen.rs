use crate::api::UpdateScoreRequest;
use crate::error::ValidationError;
use crate::format::ScoreEntry;
use crate::game::{Game, find_game};
use crate::player::{PlayerScoreRecord, RankedRecord};
use crate::ranking::assign_ranks;
use crate::view::{LeaderboardRow, NameDisplay, NamePreferences, effective_name, present};

/// Lifecycle of a leaderboard screen. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    GameSelected,
    DataLoaded,
    /// Data loaded and a search term narrows the rows.
    Filtered,
}

/// The player picked for score entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedPlayer {
    pub name: String,
    pub nickname: Option<String>,
}

/// Data side of the score-entry leaderboard screen: selected game, ranked
/// rows, search term, name preferences and the player picked for entry.
#[derive(Debug, Clone)]
pub struct LeaderboardScreen {
    game: Option<&'static Game>,
    ranked: Vec<RankedRecord>,
    loaded: bool,
    search: String,
    prefs: NamePreferences,
    picked: Option<PickedPlayer>,
}

impl Default for LeaderboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardScreen {
    pub fn new() -> Self {
        Self {
            game: None,
            ranked: Vec::new(),
            loaded: false,
            search: String::new(),
            prefs: NamePreferences::new(),
            picked: None,
        }
    }

    pub fn state(&self) -> ScreenState {
        match (self.game, self.loaded) {
            (None, _) => ScreenState::Idle,
            (Some(_), false) => ScreenState::GameSelected,
            (Some(_), true) if self.search.trim().is_empty() => ScreenState::DataLoaded,
            (Some(_), true) => ScreenState::Filtered,
        }
    }

    pub fn game(&self) -> Option<&'static Game> {
        self.game
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn picked(&self) -> Option<&PickedPlayer> {
        self.picked.as_ref()
    }

    pub fn preferences(&self) -> &NamePreferences {
        &self.prefs
    }

    pub fn ranked(&self) -> &[RankedRecord] {
        &self.ranked
    }

    /// Switch to a game. Selecting a different game drops loaded data, the
    /// search term and the picked player; re-selecting the current game
    /// keeps everything.
    pub fn select_game(&mut self, id: &str) -> Result<&'static Game, ValidationError> {
        let game = find_game(id).ok_or_else(|| ValidationError::UnknownGame(id.to_string()))?;
        if self.game.is_some_and(|g| g.id == game.id) {
            return Ok(game);
        }
        self.game = Some(game);
        self.ranked.clear();
        self.loaded = false;
        self.search.clear();
        self.picked = None;
        Ok(game)
    }

    /// Install freshly fetched records for `game_id`.
    ///
    /// Returns `false` and leaves the screen untouched when the records are
    /// for a game that is no longer selected.
    pub fn apply_data(&mut self, game_id: &str, records: Vec<PlayerScoreRecord>) -> bool {
        let Some(game) = self.game.filter(|g| g.id == game_id) else {
            tracing::debug!(game = game_id, "Dropping records for unselected game");
            return false;
        };
        self.ranked = assign_ranks(records, game.scoring_mode);
        self.loaded = true;
        true
    }

    /// Install records that were already ranked elsewhere (e.g. by the
    /// poller). Same staleness rule as [`apply_data`](Self::apply_data).
    pub fn apply_ranked(&mut self, game_id: &str, ranked: Vec<RankedRecord>) -> bool {
        if !self.game.is_some_and(|g| g.id == game_id) {
            tracing::debug!(game = game_id, "Dropping ranking for unselected game");
            return false;
        }
        self.ranked = ranked;
        self.loaded = true;
        true
    }

    /// Manual search edits drop the picked player.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.picked = None;
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    /// Pick a player for score entry and search for their shown name.
    pub fn pick_player(&mut self, name: &str) -> Result<(), ValidationError> {
        let entry = self
            .ranked
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| ValidationError::UnknownPlayer(name.to_string()))?;
        self.search = effective_name(entry, &self.prefs).to_string();
        self.picked = Some(PickedPlayer {
            name: entry.name().to_string(),
            nickname: entry.nickname().map(String::from),
        });
        Ok(())
    }

    /// Toggle one player's name display. When the search term is the picked
    /// player's old shown name it follows the switch.
    pub fn toggle_name(&mut self, name: &str) -> NameDisplay {
        let now = self.prefs.toggle(name);
        if let Some(p) = &self.picked
            && p.name == name
            && let Some(nick) = &p.nickname
        {
            let (from, to) = match now {
                NameDisplay::RealName => (nick, &p.name),
                NameDisplay::Nickname => (&p.name, nick),
            };
            if self.search == *from {
                self.search = to.clone();
            }
        }
        now
    }

    /// Rows to render: filtered by the search term with display names
    /// resolved.
    pub fn rows(&self) -> Vec<LeaderboardRow> {
        present(&self.ranked, &self.prefs, &self.search)
    }

    /// Build the update-score request for the picked player.
    ///
    /// The player is keyed by nickname when they have one and are not set to
    /// show their real name; otherwise by real name.
    pub fn score_submission(&self, entry: &ScoreEntry) -> Result<UpdateScoreRequest, ValidationError> {
        let game = self.game.ok_or(ValidationError::NoGameSelected)?;
        let player = self
            .picked
            .as_ref()
            .ok_or(ValidationError::NoPlayerSelected)?;
        let new_score = entry.to_score()?;

        let by_nickname = player.nickname.is_some() && !self.prefs.shows_real_name(&player.name);
        let (player_name, nickname, display) = if by_nickname {
            (None, player.nickname.clone(), NameDisplay::Nickname)
        } else {
            (Some(player.name.clone()), None, NameDisplay::RealName)
        };

        Ok(UpdateScoreRequest {
            game_name: game.id.to_string(),
            player_name,
            nickname,
            new_score,
            display_type: display.display_type(),
        })
    }

    /// Reset transient entry state after the server accepted a score.
    pub fn submission_succeeded(&mut self) {
        self.prefs.reset();
        self.search.clear();
        self.picked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ScoringMode;

    fn records() -> Vec<PlayerScoreRecord> {
        vec![
            PlayerScoreRecord::new("Lin", 20),
            PlayerScoreRecord::new("Wang", 30).with_nickname("Alice"),
            PlayerScoreRecord::new("Chen", 0).with_nickname("Bob"),
        ]
    }

    fn loaded(game: &str) -> LeaderboardScreen {
        let mut screen = LeaderboardScreen::new();
        screen.select_game(game).unwrap();
        assert!(screen.apply_data(game, records()));
        screen
    }

    #[test]
    fn state_transitions() {
        let mut screen = LeaderboardScreen::new();
        assert_eq!(screen.state(), ScreenState::Idle);
        screen.select_game("game_1").unwrap();
        assert_eq!(screen.state(), ScreenState::GameSelected);
        screen.apply_data("game_1", records());
        assert_eq!(screen.state(), ScreenState::DataLoaded);
        screen.set_search("li");
        assert_eq!(screen.state(), ScreenState::Filtered);
        // A refresh while filtered keeps the filter.
        screen.apply_data("game_1", records());
        assert_eq!(screen.state(), ScreenState::Filtered);
        screen.clear_search();
        assert_eq!(screen.state(), ScreenState::DataLoaded);
    }

    #[test]
    fn unknown_game_rejected() {
        let mut screen = LeaderboardScreen::new();
        assert_eq!(
            screen.select_game("game_9").unwrap_err(),
            ValidationError::UnknownGame("game_9".into())
        );
        assert_eq!(screen.state(), ScreenState::Idle);
    }

    #[test]
    fn switching_games_clears_data() {
        let mut screen = loaded("game_1");
        screen.set_search("Lin");
        screen.select_game("game_4").unwrap();
        assert_eq!(screen.state(), ScreenState::GameSelected);
        assert!(screen.rows().is_empty());
        assert_eq!(screen.search(), "");
    }

    #[test]
    fn reselecting_same_game_keeps_data() {
        let mut screen = loaded("game_1");
        screen.select_game("game_1").unwrap();
        assert_eq!(screen.state(), ScreenState::DataLoaded);
        assert_eq!(screen.rows().len(), 3);
    }

    #[test]
    fn stale_data_is_ignored() {
        let mut screen = loaded("game_1");
        assert!(!screen.apply_data("game_2", vec![PlayerScoreRecord::new("X", 1)]));
        assert_eq!(screen.rows().len(), 3);
        let mut idle = LeaderboardScreen::new();
        assert!(!idle.apply_data("game_1", records()));
        assert_eq!(idle.state(), ScreenState::Idle);
    }

    #[test]
    fn apply_ranked_uses_same_staleness_rule() {
        let mut screen = loaded("game_1");
        let ranked = assign_ranks(vec![PlayerScoreRecord::new("X", 1)], ScoringMode::Points);
        assert!(!screen.apply_ranked("game_3", ranked.clone()));
        assert!(screen.apply_ranked("game_1", ranked));
        assert_eq!(screen.rows().len(), 1);
    }

    #[test]
    fn rows_are_ranked_for_game_mode() {
        let screen = loaded("game_4");
        let names: Vec<_> = screen.rows().into_iter().map(|r| r.display_name).collect();
        // Elapsed time: 20s beats 30s.
        assert_eq!(names, vec!["Lin", "Alice", "Bob"]);
    }

    #[test]
    fn pick_player_uses_shown_name() {
        let mut screen = loaded("game_1");
        screen.pick_player("Wang").unwrap();
        assert_eq!(screen.search(), "Alice");
        assert_eq!(screen.rows().len(), 1);
        assert_eq!(
            screen.pick_player("Nobody"),
            Err(ValidationError::UnknownPlayer("Nobody".into()))
        );
        assert_eq!(screen.picked().map(|p| p.name.as_str()), Some("Wang"));
    }

    #[test]
    fn toggle_swaps_search_term() {
        let mut screen = loaded("game_1");
        screen.pick_player("Wang").unwrap();
        assert_eq!(screen.toggle_name("Wang"), NameDisplay::RealName);
        assert_eq!(screen.search(), "Wang");
        assert_eq!(screen.toggle_name("Wang"), NameDisplay::Nickname);
        assert_eq!(screen.search(), "Alice");
    }

    #[test]
    fn submission_by_nickname() {
        let mut screen = loaded("game_1");
        screen.pick_player("Wang").unwrap();
        let req = screen
            .score_submission(&ScoreEntry::Points("55".into()))
            .unwrap();
        assert_eq!(req.game_name, "game_1");
        assert_eq!(req.player_name, None);
        assert_eq!(req.nickname.as_deref(), Some("Alice"));
        assert_eq!(req.new_score, 55);
        assert_eq!(req.display_type, 1);
    }

    #[test]
    fn submission_by_real_name() {
        let mut screen = loaded("game_4");
        screen.pick_player("Wang").unwrap();
        screen.toggle_name("Wang");
        let req = screen
            .score_submission(&ScoreEntry::Time {
                minutes: "2".into(),
                seconds: "05".into(),
            })
            .unwrap();
        assert_eq!(req.player_name.as_deref(), Some("Wang"));
        assert_eq!(req.nickname, None);
        assert_eq!(req.new_score, 125);
        assert_eq!(req.display_type, 0);
    }

    #[test]
    fn submission_without_nickname_uses_name() {
        let mut screen = loaded("game_1");
        screen.pick_player("Lin").unwrap();
        let req = screen
            .score_submission(&ScoreEntry::Points("1".into()))
            .unwrap();
        assert_eq!(req.player_name.as_deref(), Some("Lin"));
        assert_eq!(req.display_type, 0);
    }

    #[test]
    fn submission_requires_game_and_player() {
        let screen = LeaderboardScreen::new();
        assert_eq!(
            screen.score_submission(&ScoreEntry::Points("1".into())),
            Err(ValidationError::NoGameSelected)
        );
        let screen = loaded("game_1");
        assert_eq!(
            screen.score_submission(&ScoreEntry::Points("1".into())),
            Err(ValidationError::NoPlayerSelected)
        );
    }

    #[test]
    fn manual_search_drops_pick() {
        let mut screen = loaded("game_1");
        screen.pick_player("Lin").unwrap();
        screen.set_search("Li");
        assert!(screen.picked().is_none());
    }

    #[test]
    fn success_resets_transient_state() {
        let mut screen = loaded("game_1");
        screen.pick_player("Wang").unwrap();
        screen.toggle_name("Wang");
        screen.submission_succeeded();
        assert!(screen.picked().is_none());
        assert_eq!(screen.search(), "");
        assert_eq!(screen.preferences(), &NamePreferences::new());
        assert_eq!(screen.state(), ScreenState::DataLoaded);
    }
}
