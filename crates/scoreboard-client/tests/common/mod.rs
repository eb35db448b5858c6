use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post, put};

use scoreboard_client::{ApiClient, ClientConfig, Session};
use scoreboard_core::api::{
    AddMemberRequest, DeleteMemberRequest, LoginRequest, SearchRequest, UpdateScoreRequest,
};
use scoreboard_core::test_helpers::sample_game_records;
use scoreboard_core::{GAMES, PlayerScoreRecord};

pub const TEST_TOKEN: &str = "test-token";

/// In-memory stand-in for the scoreboard API.
#[derive(Default)]
pub struct MockApi {
    /// Records per game id.
    pub players: Mutex<HashMap<String, Vec<PlayerScoreRecord>>>,
    /// When set, every players/csv route requires this bearer token.
    pub required_token: Option<String>,
    pub search_delay: Duration,
    /// While set, the search endpoint answers 500.
    pub fail_search: AtomicBool,
    pub search_calls: Mutex<HashMap<String, usize>>,
    in_flight: Mutex<HashMap<String, usize>>,
    pub max_in_flight: AtomicUsize,
    pub score_updates: Mutex<Vec<UpdateScoreRequest>>,
    pub imports: Mutex<Vec<Bytes>>,
}

impl MockApi {
    fn seeded(required_token: Option<String>, search_delay: Duration) -> Self {
        let players = GAMES
            .iter()
            .map(|g| (g.id.to_string(), sample_game_records()))
            .collect();
        Self {
            players: Mutex::new(players),
            required_token,
            search_delay,
            ..Self::default()
        }
    }

    pub fn search_count(&self, game: &str) -> usize {
        self.search_calls
            .lock()
            .unwrap()
            .get(game)
            .copied()
            .unwrap_or(0)
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let Some(token) = &self.required_token else {
            return true;
        };
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {token}"))
    }
}

type Shared = Arc<MockApi>;

pub struct TestServer {
    pub addr: SocketAddr,
    pub api: Shared,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Open API with seeded players in every game.
    pub async fn new() -> Self {
        Self::start(MockApi::seeded(None, Duration::ZERO)).await
    }

    /// API that rejects requests without `TEST_TOKEN`.
    pub async fn with_auth() -> Self {
        Self::start(MockApi::seeded(Some(TEST_TOKEN.to_string()), Duration::ZERO)).await
    }

    /// Open API whose search endpoint takes `delay` to answer.
    pub async fn with_search_delay(delay: Duration) -> Self {
        Self::start(MockApi::seeded(None, delay)).await
    }

    async fn start(api: MockApi) -> Self {
        let api = Arc::new(api);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/players/search", post(search))
            .route("/api/players/update-score", put(update_score))
            .route("/api/players/add-member", post(add_member))
            .route("/api/players/delete-member", delete(delete_member))
            .route("/api/csv/import", post(import_csv))
            .with_state(Arc::clone(&api));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            api,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self, session: Session) -> ApiClient {
        let config = ClientConfig {
            base_url: self.base_url(),
            ..ClientConfig::default()
        };
        ApiClient::new(&config, session).unwrap()
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(serde_json::json!({ "message": text }))).into_response()
}

async fn login(Json(req): Json<LoginRequest>) -> Response {
    if req.username == "admin" && req.password == "password" {
        Json(serde_json::json!({ "token": TEST_TOKEN })).into_response()
    } else {
        message(StatusCode::UNAUTHORIZED, "invalid username or password")
    }
}

async fn search(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<SearchRequest>,
) -> Response {
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if api.fail_search.load(Ordering::SeqCst) {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }

    *api
        .search_calls
        .lock()
        .unwrap()
        .entry(req.game_name.clone())
        .or_default() += 1;
    {
        let mut in_flight = api.in_flight.lock().unwrap();
        let n = in_flight.entry(req.game_name.clone()).or_default();
        *n += 1;
        api.max_in_flight.fetch_max(*n, Ordering::SeqCst);
    }

    if !api.search_delay.is_zero() {
        tokio::time::sleep(api.search_delay).await;
    }

    if let Some(n) = api.in_flight.lock().unwrap().get_mut(&req.game_name) {
        *n -= 1;
    }

    let players = api.players.lock().unwrap();
    match players.get(&req.game_name) {
        Some(records) => Json(records.clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "unknown game"),
    }
}

async fn update_score(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<UpdateScoreRequest>,
) -> Response {
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut players = api.players.lock().unwrap();
    let Some(records) = players.get_mut(&req.game_name) else {
        return message(StatusCode::NOT_FOUND, "unknown game");
    };
    let target = records.iter_mut().find(|r| match req.display_type {
        0 => req.player_name.as_deref() == Some(r.name.as_str()),
        _ => req.nickname.is_some() && req.nickname == r.nickname,
    });
    let Some(target) = target else {
        return message(StatusCode::NOT_FOUND, "player not found");
    };
    target.score = req.new_score;
    api.score_updates.lock().unwrap().push(req);
    StatusCode::OK.into_response()
}

async fn add_member(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<AddMemberRequest>,
) -> Response {
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut players = api.players.lock().unwrap();
    if players
        .values()
        .any(|records| records.iter().any(|r| r.name == req.name))
    {
        return message(StatusCode::CONFLICT, "player already exists");
    }
    for records in players.values_mut() {
        let mut record =
            PlayerScoreRecord::new(req.name.clone(), 0).with_department(req.department.clone());
        record.nickname = req.nickname.clone();
        records.push(record);
    }
    StatusCode::OK.into_response()
}

async fn delete_member(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<DeleteMemberRequest>,
) -> Response {
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut players = api.players.lock().unwrap();
    let mut removed = false;
    for records in players.values_mut() {
        let before = records.len();
        records.retain(|r| r.name != req.name);
        removed |= records.len() != before;
    }
    if removed {
        StatusCode::OK.into_response()
    } else {
        message(StatusCode::NOT_FOUND, "player not found")
    }
}

async fn import_csv(State(api): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    if !api.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let is_multipart = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));
    if !is_multipart {
        return (StatusCode::BAD_REQUEST, "expected a multipart upload").into_response();
    }
    api.imports.lock().unwrap().push(body);
    StatusCode::OK.into_response()
}
