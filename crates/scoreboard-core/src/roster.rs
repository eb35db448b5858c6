use std::io::Read;

use crate::api::AddMemberRequest;
use crate::error::ValidationError;

/// Longest accepted name, nickname or department, in characters.
pub const MAX_FIELD_CHARS: usize = 50;

/// Header row every import file must carry.
pub const REQUIRED_CSV_HEADERS: [&str; 3] = ["Name", "Nickname", "Department"];

/// Number of data rows kept for the import preview.
pub const PREVIEW_ROWS: usize = 5;

/// A player registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub nickname: Option<String>,
    pub department: String,
}

impl NewMember {
    /// Build a member from raw form fields, trimming each and treating a
    /// blank nickname as absent.
    pub fn new(name: &str, nickname: Option<&str>, department: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            nickname: nickname
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            department: department.trim().to_string(),
        }
    }

    /// Check every field, reporting all problems together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::Required("name"));
        } else if self.name.chars().count() > MAX_FIELD_CHARS {
            errors.push(ValidationError::TooLong("name", MAX_FIELD_CHARS));
        } else if !self
            .name
            .chars()
            .all(|c| c.is_alphanumeric() || c.is_whitespace())
        {
            errors.push(ValidationError::InvalidCharacters("name"));
        }

        if let Some(nick) = &self.nickname
            && nick.chars().count() > MAX_FIELD_CHARS
        {
            errors.push(ValidationError::TooLong("nickname", MAX_FIELD_CHARS));
        }

        if self.department.is_empty() {
            errors.push(ValidationError::Required("department"));
        } else if self.department.chars().count() > MAX_FIELD_CHARS {
            errors.push(ValidationError::TooLong("department", MAX_FIELD_CHARS));
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Fields(errors)),
        }
    }

    /// Validate and convert into the add-member request body.
    pub fn into_request(self) -> Result<AddMemberRequest, ValidationError> {
        self.validate()?;
        Ok(AddMemberRequest {
            name: self.name,
            nickname: self.nickname,
            department: self.department,
        })
    }
}

/// Header check and preview of a player import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    /// The first [`PREVIEW_ROWS`] data rows.
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl CsvPreview {
    /// Parse a CSV stream. Fails when the file has no data rows or lacks any
    /// of [`REQUIRED_CSV_HEADERS`] (exact, case-sensitive).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ValidationError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| ValidationError::MalformedCsv(e.to_string()))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        let mut total_rows = 0;
        for record in rdr.records() {
            let record = record.map_err(|e| ValidationError::MalformedCsv(e.to_string()))?;
            if total_rows < PREVIEW_ROWS {
                rows.push(record.iter().map(String::from).collect());
            }
            total_rows += 1;
        }

        if total_rows == 0 {
            return Err(ValidationError::EmptyCsv);
        }

        let missing: Vec<String> = REQUIRED_CSV_HEADERS
            .into_iter()
            .filter(|h| !headers.iter().any(|have| have.as_str() == *h))
            .map(|h| h.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingCsvHeaders(missing));
        }

        Ok(Self {
            headers,
            rows,
            total_rows,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        Self::from_reader(bytes)
    }
}
