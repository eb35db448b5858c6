pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use poller::{LeaderboardPoller, LeaderboardUpdate, PollEvent, PollerHandle};
pub use session::Session;
