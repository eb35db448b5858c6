use crate::game::ScoringMode;
use crate::player::{PlayerScoreRecord, RankedRecord};

/// Rank one game's records with competition ranking.
///
/// Scored records come first, best first (descending for points, ascending
/// for elapsed time). Equal scores share a rank and the next distinct score
/// resumes at its 1-based position, so `[10, 10, 5]` ranks `[1, 1, 3]`.
/// Ties keep their input order. Zero-score records follow, unranked, in
/// input order.
pub fn assign_ranks(records: Vec<PlayerScoreRecord>, mode: ScoringMode) -> Vec<RankedRecord> {
    let (mut scored, zero): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.score > 0);

    // `sort_by` is stable.
    match mode {
        ScoringMode::Points => scored.sort_by(|a, b| b.score.cmp(&a.score)),
        ScoringMode::ElapsedTimeSeconds => scored.sort_by(|a, b| a.score.cmp(&b.score)),
    }

    let mut ranked = Vec::with_capacity(scored.len() + zero.len());
    let mut prev: Option<(u32, u32)> = None;
    for (index, record) in scored.into_iter().enumerate() {
        let rank = match prev {
            Some((score, rank)) if score == record.score => rank,
            _ => index as u32 + 1,
        };
        prev = Some((record.score, rank));
        ranked.push(RankedRecord {
            record,
            rank: Some(rank),
        });
    }

    ranked.extend(
        zero.into_iter()
            .map(|record| RankedRecord { record, rank: None }),
    );
    ranked
}

/// The first `n` ranked rows, skipping unscored players.
pub fn top_scored(ranked: &[RankedRecord], n: usize) -> &[RankedRecord] {
    let scored = ranked.iter().take_while(|r| r.rank.is_some()).count();
    &ranked[..scored.min(n)]
}
