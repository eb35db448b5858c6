use std::fmt::Write;

use scoreboard_core::format::{format_rank, format_score_padded};
use scoreboard_core::podium::Winner;
use scoreboard_core::view::LeaderboardRow;
use scoreboard_core::{Game, ScoringMode};

const RANK_WIDTH: usize = 4;
const SCORE_WIDTH: usize = 6;
/// Rows shown per game by the live view.
pub const LIVE_ROWS: usize = 10;

/// Game heading, e.g. `Speed Genius (game_4, time)`.
pub fn heading(game: &Game) -> String {
    let kind = match game.scoring_mode {
        ScoringMode::Points => "points",
        ScoringMode::ElapsedTimeSeconds => "time",
    };
    format!("{} ({}, {kind})", game.display_name, game.id)
}

/// A ranked table: rank, shown name, score. Nicknamed players shown under
/// their nickname are marked with `*`.
pub fn board(game: &Game, rows: &[LeaderboardRow]) -> String {
    let mut out = heading(game);
    out.push('\n');
    if rows.is_empty() {
        out.push_str("  (no players)\n");
        return out;
    }

    let name_width = rows
        .iter()
        .map(|r| r.display_name.chars().count() + 1)
        .max()
        .unwrap_or(0);
    for row in rows {
        let marker = if row.has_nickname() && row.display_name != row.entry.name() {
            "*"
        } else {
            ""
        };
        let name = format!("{}{marker}", row.display_name);
        let _ = writeln!(
            out,
            "{}  {name:<name_width$}  {}",
            format_rank(row.entry.rank, RANK_WIDTH),
            format_score_padded(row.entry.score(), game.scoring_mode, SCORE_WIDTH),
        );
    }
    out
}

/// [`board`] cut to the first [`LIVE_ROWS`] rows.
pub fn live_board(game: &Game, rows: &[LeaderboardRow]) -> String {
    board(game, &rows[..rows.len().min(LIVE_ROWS)])
}

/// `1st`, `2nd`, `3rd`, ...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

pub fn winner(game: &Game, w: &Winner) -> String {
    format!("  {:>4}  {}  {}", ordinal(w.rank), w.name, w.score_text(game))
}
