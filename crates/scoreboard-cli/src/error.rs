use scoreboard_client::ClientError;
use scoreboard_core::ValidationError;

#[derive(Debug)]
pub enum CliError {
    Client(ClientError),
    Io { path: String, source: std::io::Error },
    Config(Vec<String>),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(e) => write!(f, "{e}"),
            Self::Io { path, source } => write!(f, "cannot read {path}: {source}"),
            Self::Config(problems) => write!(f, "invalid configuration: {}", problems.join("; ")),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::Config(_) => None,
        }
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::Client(ClientError::Validation(e))
    }
}
