use serde::{Deserialize, Deserializer, Serialize};

/// One player's raw score for one game, as returned by the search endpoint.
///
/// A score of `0` is the "no score recorded" sentinel, never a real value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScoreRecord {
    pub name: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub department: Option<String>,
    #[serde(default)]
    pub score: u32,
}

impl PlayerScoreRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            nickname: None,
            department: None,
            score,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn has_score(&self) -> bool {
        self.score > 0
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }
}

/// A record with its competition rank. `rank` is `None` iff `score == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub record: PlayerScoreRecord,
    pub rank: Option<u32>,
}

impl RankedRecord {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn nickname(&self) -> Option<&str> {
        self.record.nickname()
    }

    pub fn score(&self) -> u32 {
        self.record.score
    }
}

/// Treat `""` the same as a missing field.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
