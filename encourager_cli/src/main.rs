mod driver;
mod remote;
mod view;

use clap::{Parser, Subcommand};
use driver::{Session, Ticker};
use encourager_core::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "encourager")]
#[command(about = "Receive one inspirational verse per day", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verse service base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use the built-in verses instead of the verse service
    #[arg(long, global = true)]
    offline: bool,

    /// Language to use when no preference has been saved (en, am, fi)
    #[arg(long, global = true)]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's blessing (default)
    Today {
        /// Say Amen without prompting (for scripting)
        #[arg(long)]
        auto_amen: bool,
    },

    /// Set the preferred language (en, am, fi)
    Lang {
        code: String,
    },

    /// Show today's blessing with a live countdown to midnight
    Watch {
        /// Stop after this many seconds
        #[arg(long)]
        seconds: Option<u64>,
    },

    /// Show whether today's blessing was received
    Status {
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },
}

type ClientSession = Session<FileRepository, SystemClock>;

#[tokio::main]
async fn main() -> Result<()> {
    // Views go to stdout; keep logs quiet unless asked
    encourager_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.client.data_dir.clone());
    let default_language = match &cli.lang {
        Some(code) => parse_language(code),
        None => config.client.default_language,
    };

    let source: Box<dyn VerseSource> = if cli.offline {
        Box::new(LocalSource::new(VerseLookup::with_thread_rng(
            get_default_catalog(),
        )))
    } else {
        let api_url = cli.api_url.clone().unwrap_or_else(|| config.client.api_url.clone());
        Box::new(remote::HttpVerseSource::new(
            &api_url,
            Duration::from_secs(config.client.timeout_secs),
        )?)
    };

    let state = DailyBlessing::new(FileRepository::new(data_dir), SystemClock, default_language);
    let mut session = Session::new(state, source);

    match cli.command {
        Some(Commands::Today { auto_amen }) => cmd_today(&mut session, auto_amen).await,
        Some(Commands::Lang { code }) => cmd_lang(&mut session, &code).await,
        Some(Commands::Watch { seconds }) => cmd_watch(&mut session, seconds).await,
        Some(Commands::Status { json }) => cmd_status(&mut session, json),
        None => cmd_today(&mut session, false).await,
    }
}

fn parse_language(code: &str) -> Language {
    Language::parse_known(code).unwrap_or_else(|| {
        eprintln!("Unknown language: {}. Using {}.", code, Language::default());
        Language::default()
    })
}

enum UserAction {
    Amen,
    SwitchLanguage,
    Quit,
}

fn prompt_user_action() -> Result<UserAction> {
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(UserAction::Quit);
    }

    let action = match input.trim().to_lowercase().as_str() {
        "l" => UserAction::SwitchLanguage,
        "q" => UserAction::Quit,
        _ => UserAction::Amen,
    };

    Ok(action)
}

fn wait_for_enter() -> Result<()> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(())
}

async fn cmd_today(session: &mut ClientSession, auto_amen: bool) -> Result<()> {
    let commands = session.state.start()?;
    if session.state.snapshot().loading {
        view::loading();
    }
    session.execute(commands).await;

    loop {
        let snapshot = session.state.snapshot();
        match snapshot.phase {
            Phase::Reflecting => {
                view::reflection(&snapshot);
                break;
            }
            Phase::Prompting { loading: false } => {
                view::prompt(&snapshot);

                let action = if auto_amen {
                    UserAction::Amen
                } else {
                    prompt_user_action()?
                };

                match action {
                    UserAction::Amen => {
                        let commands = session.state.accept()?;
                        for command in session.execute(commands).await {
                            if command == Command::Celebrate {
                                view::celebration(session.state.language());
                            }
                        }

                        if !auto_amen {
                            view::continue_hint(session.state.language());
                            wait_for_enter()?;
                        }

                        let commands = session.state.next()?;
                        session.execute(commands).await;
                    }
                    UserAction::SwitchLanguage => {
                        let commands = session.state.cycle_language();
                        session.execute(commands).await;
                    }
                    UserAction::Quit => break,
                }
            }
            other => {
                tracing::warn!("Unexpected phase {:?}", other);
                break;
            }
        }
    }

    session.state.close();
    Ok(())
}

async fn cmd_lang(session: &mut ClientSession, code: &str) -> Result<()> {
    let language = parse_language(code);

    // Lookups issued by start() are superseded by the language change
    session.state.start()?;
    let commands = session.state.change_language(language);

    if session.state.is_locked() {
        session.execute(commands).await;
        view::reflection(&session.state.snapshot());
    } else {
        println!("Language set to {} ({})", language, language.label());
    }

    session.state.close();
    Ok(())
}

async fn cmd_watch(session: &mut ClientSession, seconds: Option<u64>) -> Result<()> {
    let commands = session.state.start()?;
    if !commands.contains(&Command::StartTicker) {
        println!("No blessing received yet today. Run `encourager today` first.");
        return Ok(());
    }

    view::reflection(&session.state.snapshot());

    let mut ticker = Ticker::start(Duration::from_secs(1));
    let mut elapsed = 0u64;

    loop {
        tokio::select! {
            tick = ticker.tick() => {
                if tick.is_none() {
                    break;
                }
                let remaining = match session.state.tick() {
                    Some(remaining) => remaining,
                    None => break,
                };
                view::countdown_line(&format_countdown(remaining));
                if remaining.num_seconds() <= 0 {
                    break;
                }
                if let Some(limit) = seconds {
                    elapsed += 1;
                    if elapsed >= limit {
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    println!();

    if session.state.close().contains(&Command::StopTicker) {
        ticker.stop();
    }
    Ok(())
}

fn cmd_status(session: &mut ClientSession, json: bool) -> Result<()> {
    // Only the persisted state matters here; the issued lookup is dropped
    session.state.start()?;
    let snapshot = session.state.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        view::status(&snapshot);
    }

    session.state.close();
    Ok(())
}
