/// A locally detected problem with operator input. Blocks submission and is
/// fully recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left empty.
    Required(&'static str),
    /// A field exceeded its length limit (field, limit in characters).
    TooLong(&'static str, usize),
    /// A field contains characters outside its allowed set.
    InvalidCharacters(&'static str),
    /// A numeric field could not be parsed.
    NotANumber(String),
    /// Seconds component of a time entry was 60 or more.
    SecondsOutOfRange(u32),
    /// Time text was not in `m:ss` form.
    MalformedTime(String),
    UnknownGame(String),
    /// No game has been selected yet.
    NoGameSelected,
    /// No player has been picked for score entry.
    NoPlayerSelected,
    /// No loaded record has this player name.
    UnknownPlayer(String),
    EmptyCsv,
    /// CSV header row lacks required columns.
    MissingCsvHeaders(Vec<String>),
    /// CSV could not be parsed at all.
    MalformedCsv(String),
    /// Several field-level errors collected from one form.
    Fields(Vec<ValidationError>),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is required"),
            Self::TooLong(field, max) => {
                write!(f, "{field} must be at most {max} characters")
            },
            Self::InvalidCharacters(field) => write!(
                f,
                "{field} may only contain letters, digits and spaces"
            ),
            Self::NotANumber(text) => write!(f, "'{text}' is not a number"),
            Self::SecondsOutOfRange(s) => {
                write!(f, "seconds must be less than 60 (got {s})")
            },
            Self::MalformedTime(text) => {
                write!(f, "'{text}' is not a time in m:ss form")
            },
            Self::UnknownGame(id) => write!(f, "unknown game '{id}'"),
            Self::NoGameSelected => write!(f, "no game selected"),
            Self::NoPlayerSelected => write!(f, "no player selected"),
            Self::UnknownPlayer(name) => write!(f, "no player named '{name}' in this game"),
            Self::EmptyCsv => write!(f, "CSV file is empty"),
            Self::MissingCsvHeaders(missing) => write!(
                f,
                "CSV is missing required headers: {} (expected Name, Nickname, Department)",
                missing.join(", ")
            ),
            Self::MalformedCsv(e) => write!(f, "could not parse CSV: {e}"),
            Self::Fields(errors) => {
                let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join("; "))
            },
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_joins_messages() {
        let err = ValidationError::Fields(vec![
            ValidationError::Required("name"),
            ValidationError::TooLong("department", 50),
        ]);
        assert_eq!(
            err.to_string(),
            "name is required; department must be at most 50 characters"
        );
    }

    #[test]
    fn unknown_player_names_the_player() {
        let err = ValidationError::UnknownPlayer("Nobody".into());
        assert_eq!(err.to_string(), "no player named 'Nobody' in this game");
    }

    #[test]
    fn missing_headers_lists_columns() {
        let err = ValidationError::MissingCsvHeaders(vec!["Nickname".into()]);
        assert!(err.to_string().contains("Nickname"));
    }
}
