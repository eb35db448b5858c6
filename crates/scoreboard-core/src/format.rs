use crate::error::ValidationError;
use crate::game::ScoringMode;

/// Display text for the "no score recorded" sentinel.
pub const NO_SCORE: &str = "no score";

/// Display text for an unranked row.
pub const NO_RANK: &str = "-";

/// Render a raw score for display.
///
/// - `0` renders as [`NO_SCORE`] in every mode.
/// - Points render as the plain integer.
/// - Elapsed times render as `m:ss`. There is no hours rollover: 3600s and
///   above render as `60:00`, `61:05`, ...
pub fn format_score(score: u32, mode: ScoringMode) -> String {
    if score == 0 {
        return NO_SCORE.to_string();
    }
    match mode {
        ScoringMode::Points => score.to_string(),
        ScoringMode::ElapsedTimeSeconds => format_time(score),
    }
}

/// Like [`format_score`], but left-pads point scores to `width` for column
/// alignment. Times and the sentinel are never padded.
pub fn format_score_padded(score: u32, mode: ScoringMode, width: usize) -> String {
    match mode {
        ScoringMode::Points if score > 0 => format!("{score:>width$}"),
        _ => format_score(score, mode),
    }
}

/// Render a rank column, right-aligned to `width`.
pub fn format_rank(rank: Option<u32>, width: usize) -> String {
    match rank {
        Some(r) => format!("{r:>width$}"),
        None => format!("{NO_RANK:>width$}"),
    }
}

/// `m:ss` rendering of a number of seconds, including `0:00`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Parse `m:ss` (or `m:s`) back into whole seconds. Inverse of
/// [`format_time`].
pub fn parse_time(text: &str) -> Result<u32, ValidationError> {
    let malformed = || ValidationError::MalformedTime(text.to_string());
    let (min, sec) = text.trim().split_once(':').ok_or_else(malformed)?;
    if min.is_empty() || sec.is_empty() || sec.len() > 2 {
        return Err(malformed());
    }
    if !is_digits(min) || !is_digits(sec) {
        return Err(malformed());
    }
    let minutes: u32 = min.parse().map_err(|_| malformed())?;
    let seconds: u32 = sec.parse().map_err(|_| malformed())?;
    if seconds >= 60 {
        return Err(ValidationError::SecondsOutOfRange(seconds));
    }
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(malformed)
}

/// Parse text produced by [`format_score`] back into a raw score.
///
/// [`NO_SCORE`] maps to `0`; otherwise points are a plain integer and times
/// use `m:ss`.
pub fn parse_score(text: &str, mode: ScoringMode) -> Result<u32, ValidationError> {
    let text = text.trim();
    if text == NO_SCORE {
        return Ok(0);
    }
    match mode {
        ScoringMode::Points => parse_number(text),
        ScoringMode::ElapsedTimeSeconds => parse_time(text),
    }
}

/// Raw operator input for a score, before it is turned into a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreEntry {
    /// Free-text point value.
    Points(String),
    /// Separate minute and second fields; either may be blank.
    Time { minutes: String, seconds: String },
}

impl ScoreEntry {
    /// Build an entry from a single string: `m:ss` for timed games, a plain
    /// number otherwise.
    pub fn from_text(text: &str, mode: ScoringMode) -> Result<Self, ValidationError> {
        match mode {
            ScoringMode::Points => Ok(ScoreEntry::Points(text.to_string())),
            ScoringMode::ElapsedTimeSeconds => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(ValidationError::Required("time"));
                }
                match text.split_once(':') {
                    Some((m, s)) => Ok(ScoreEntry::Time {
                        minutes: m.to_string(),
                        seconds: s.to_string(),
                    }),
                    // Bare number of seconds.
                    None => Ok(ScoreEntry::Time {
                        minutes: String::new(),
                        seconds: text.to_string(),
                    }),
                }
            },
        }
    }

    /// Resolve to a raw score.
    ///
    /// Time entries need at least one of the two fields; a blank field
    /// counts as zero and seconds must stay below 60.
    pub fn to_score(&self) -> Result<u32, ValidationError> {
        match self {
            ScoreEntry::Points(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(ValidationError::Required("score"));
                }
                parse_number(text)
            },
            ScoreEntry::Time { minutes, seconds } => {
                let (minutes, seconds) = (minutes.trim(), seconds.trim());
                if minutes.is_empty() && seconds.is_empty() {
                    return Err(ValidationError::Required("time"));
                }
                let m = if minutes.is_empty() {
                    0
                } else {
                    parse_number(minutes)?
                };
                let s = if seconds.is_empty() {
                    0
                } else {
                    parse_number(seconds)?
                };
                if s >= 60 {
                    return Err(ValidationError::SecondsOutOfRange(s));
                }
                m.checked_mul(60)
                    .and_then(|m| m.checked_add(s))
                    .ok_or_else(|| ValidationError::NotANumber(minutes.to_string()))
            },
        }
    }
}

/// Non-empty and ASCII digits only; `str::parse` alone would take a sign.
fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(text: &str) -> Result<u32, ValidationError> {
    if !is_digits(text) {
        return Err(ValidationError::NotANumber(text.to_string()));
    }
    text.parse::<u32>()
        .map_err(|_| ValidationError::NotANumber(text.to_string()))
}
