use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use scoreboard_core::api::{
    ApiErrorBody, DeleteMemberRequest, LoginRequest, LoginResponse, SearchRequest,
    UpdateScoreRequest,
};
use scoreboard_core::roster::{CsvPreview, NewMember};
use scoreboard_core::{Game, PlayerScoreRecord, RankedRecord, ValidationError, assign_ranks};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;

/// Typed client for the scoreboard REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent("scoreboard-client/0.1")
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request, mapping 401 to [`ClientError::AuthExpired`] (after
    /// clearing the session) and other failures to [`ClientError::Api`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        self.dispatch(request, true).await
    }

    async fn dispatch(&self, request: RequestBuilder, session_bound: bool) -> Result<Response, ClientError> {
        let resp = self.authorize(request).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED && session_bound {
            tracing::warn!("API rejected credentials, clearing session");
            self.session.logout();
            return Err(ClientError::AuthExpired);
        }
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "Failed to read error body");
                String::new()
            },
        };
        let message = error_message(status, &body);
        tracing::warn!(status = status.as_u16(), %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        decode(self.send(request).await?).await
    }

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        if username.trim().is_empty() {
            return Err(ValidationError::Required("username").into());
        }
        if password.is_empty() {
            return Err(ValidationError::Required("password").into());
        }
        let body = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        // A 401 here means bad credentials, not an expired session.
        let resp = self
            .dispatch(self.client.post(self.url("/auth/login")).json(&body), false)
            .await?;
        let resp: LoginResponse = decode(resp).await?;
        self.session.login(resp.token);
        Ok(())
    }

    /// Raw score records for one game. A score of 0 means "not played".
    #[tracing::instrument(level = "debug", skip(self, game), fields(game = game.id))]
    pub async fn search_players(&self, game: &Game) -> Result<Vec<PlayerScoreRecord>, ClientError> {
        let body = SearchRequest {
            game_name: game.id.to_string(),
        };
        let records: Vec<PlayerScoreRecord> = self
            .json(self.client.post(self.url("/players/search")).json(&body))
            .await?;
        tracing::debug!(count = records.len(), "Fetched player records");
        Ok(records)
    }

    /// Fetch and rank one game's leaderboard.
    pub async fn leaderboard(&self, game: &Game) -> Result<Vec<RankedRecord>, ClientError> {
        let records = self.search_players(game).await?;
        Ok(assign_ranks(records, game.scoring_mode))
    }

    pub async fn update_score(&self, request: &UpdateScoreRequest) -> Result<(), ClientError> {
        self.send(self.client.put(self.url("/players/update-score")).json(request))
            .await?;
        tracing::info!(
            game = %request.game_name,
            score = request.new_score,
            display_type = request.display_type,
            "Score updated"
        );
        Ok(())
    }

    /// Register a player in every game. The form is validated locally first.
    pub async fn add_member(&self, member: NewMember) -> Result<(), ClientError> {
        let body = member.into_request()?;
        self.send(self.client.post(self.url("/players/add-member")).json(&body))
            .await?;
        tracing::info!(name = %body.name, "Member added");
        Ok(())
    }

    /// Remove a player from every game.
    pub async fn delete_member(&self, name: &str) -> Result<(), ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name").into());
        }
        let body = DeleteMemberRequest {
            name: name.to_string(),
        };
        self.send(self.client.delete(self.url("/players/delete-member")).json(&body))
            .await?;
        tracing::info!(name, "Member deleted");
        Ok(())
    }

    /// Check an import file's headers locally, then upload it. Returns the
    /// preview of what was sent.
    pub async fn import_csv(&self, file_name: &str, bytes: Vec<u8>) -> Result<CsvPreview, ClientError> {
        let preview = CsvPreview::from_bytes(&bytes)?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        self.send(self.client.post(self.url("/csv/import")).multipart(form))
            .await?;
        tracing::info!(file = file_name, rows = preview.total_rows, "CSV imported");
        Ok(preview)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Transport(format!("invalid response body: {e}")))
}

/// Prefer the JSON `message` field, then the raw body, then the status text.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.message;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
