mod args;
mod config;
mod error;
mod render;

use std::process::ExitCode;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use scoreboard_client::{ApiClient, ClientError, LeaderboardPoller, PollEvent, Session};
use scoreboard_core::podium::{Ceremony, Podium};
use scoreboard_core::roster::NewMember;
use scoreboard_core::screen::LeaderboardScreen;
use scoreboard_core::{GAMES, NamePreferences, ScoreEntry, present};

use args::Command;
use config::CliConfig;
use error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let invocation = match args::parse(std::env::args().skip(1)) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("error: {e}\n\n{}", args::USAGE);
            return ExitCode::from(2);
        },
    };
    if invocation.command == Command::Help {
        println!("{}", args::USAGE);
        return ExitCode::SUCCESS;
    }

    let config = CliConfig::load(invocation.config_path.as_deref());
    match run(invocation.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        },
    }
}

async fn run(command: Command, mut config: CliConfig) -> Result<(), CliError> {
    if let Command::Live {
        interval_secs: Some(secs),
    } = command
    {
        config.client.poll_interval_secs = secs;
    }
    let problems = config.client.validate();
    if !problems.is_empty() {
        return Err(CliError::Config(problems));
    }

    let session = Session::with_token(config.client.token.clone());
    let api = ApiClient::new(&config.client, session)?;

    match command {
        Command::Help => Ok(()),
        Command::Games => {
            for game in &GAMES {
                println!("{}", render::heading(game));
            }
            Ok(())
        },
        Command::Login { username, password } => {
            api.login(&username, &password).await?;
            if let Some(token) = api.session().token() {
                println!("{token}");
                tracing::info!("Export SCOREBOARD_TOKEN to reuse this session");
            }
            Ok(())
        },
        Command::Board {
            game,
            search,
            real_names,
        } => board(&api, &game, search.as_deref(), &real_names).await,
        Command::Live { .. } => live(api, config.client.poll_interval()).await,
        Command::Podium => podium(&api).await,
        Command::Score {
            game,
            player,
            value,
            by_nickname,
        } => score(&api, &game, &player, &value, by_nickname).await,
        Command::AddMember {
            name,
            department,
            nickname,
        } => {
            api.add_member(NewMember::new(&name, nickname.as_deref(), &department))
                .await?;
            println!("Added {}", name.trim());
            Ok(())
        },
        Command::DeleteMember { name } => {
            api.delete_member(&name).await?;
            println!("Deleted {}", name.trim());
            Ok(())
        },
        Command::Import { path } => import(&api, &path).await,
    }
}

/// Select a game and load its current records into a fresh screen.
async fn load_screen(api: &ApiClient, game_id: &str) -> Result<LeaderboardScreen, CliError> {
    let mut screen = LeaderboardScreen::new();
    let game = screen.select_game(game_id)?;
    let records = api.search_players(game).await?;
    screen.apply_data(game.id, records);
    Ok(screen)
}

fn print_screen(screen: &LeaderboardScreen) {
    if let Some(game) = screen.game() {
        print!("{}", render::board(game, &screen.rows()));
    }
}

async fn board(
    api: &ApiClient,
    game_id: &str,
    search: Option<&str>,
    real_names: &[String],
) -> Result<(), CliError> {
    let mut screen = load_screen(api, game_id).await?;
    for name in real_names {
        screen.toggle_name(name);
    }
    if let Some(term) = search {
        screen.set_search(term);
    }
    print_screen(&screen);
    Ok(())
}

async fn live(api: ApiClient, interval: Duration) -> Result<(), CliError> {
    let (tx, mut rx) = mpsc::channel(GAMES.len() * 2);
    let handle = LeaderboardPoller::new(api, interval).spawn(tx);
    let prefs = NamePreferences::new();

    let result = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break Ok(());
            },
            event = rx.recv() => match event {
                Some(PollEvent::Updated(update)) => {
                    let rows = present(&update.ranked, &prefs, "");
                    println!("{}", render::live_board(update.game, &rows));
                },
                Some(PollEvent::Failed {
                    error: ClientError::AuthExpired,
                    ..
                }) => {
                    break Err(ClientError::AuthExpired.into());
                },
                Some(PollEvent::Failed { game, error }) => {
                    tracing::warn!(
                        game = game.id,
                        error = %error,
                        "Refresh failed, keeping last board"
                    );
                },
                None => break Ok(()),
            },
        }
    };

    handle.shutdown().await;
    result
}

/// Run the ceremony reveal for every game: third place first.
async fn podium(api: &ApiClient) -> Result<(), CliError> {
    let mut podiums = Vec::with_capacity(GAMES.len());
    for game in &GAMES {
        let ranked = api.leaderboard(game).await?;
        podiums.push(Podium::from_ranked(game, &ranked));
    }

    let mut ceremony = Ceremony::new();
    ceremony.replace_podiums(podiums);
    while !ceremony.all_revealed() {
        let game = ceremony.current_podium().game;
        println!("{}", render::heading(game));
        if ceremony.current_podium().winners.is_empty() {
            println!("  (no scores yet)");
        }
        while let Some(w) = ceremony.reveal_next() {
            println!("{}", render::winner(game, w));
        }
        ceremony.advance();
    }
    Ok(())
}

async fn score(
    api: &ApiClient,
    game_id: &str,
    player: &str,
    value: &str,
    by_nickname: bool,
) -> Result<(), CliError> {
    let mut screen = load_screen(api, game_id).await?;
    let Some(game) = screen.game() else {
        return Ok(());
    };

    // Accept either the real name or the nickname on the command line
    let name = screen
        .ranked()
        .iter()
        .find(|r| r.name() == player)
        .or_else(|| screen.ranked().iter().find(|r| r.nickname() == Some(player)))
        .map(|r| r.name().to_string())
        .unwrap_or_else(|| player.to_string());
    screen.pick_player(&name)?;
    if !by_nickname {
        screen.toggle_name(&name);
    }

    let entry = ScoreEntry::from_text(value, game.scoring_mode)?;
    let request = screen.score_submission(&entry)?;
    api.update_score(&request).await?;
    screen.submission_succeeded();

    let records = api.search_players(game).await?;
    screen.apply_data(game.id, records);
    print_screen(&screen);
    Ok(())
}

async fn import(api: &ApiClient, path: &str) -> Result<(), CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;
    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    let preview = api.import_csv(&file_name, bytes).await?;
    println!("{}", preview.headers.join(", "));
    for row in &preview.rows {
        println!("{}", row.join(", "));
    }
    if preview.total_rows > preview.rows.len() {
        println!("... {} more", preview.total_rows - preview.rows.len());
    }
    println!("Imported {} rows from {file_name}", preview.total_rows);
    Ok(())
}
