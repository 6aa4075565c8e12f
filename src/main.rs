#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use tracing_subscriber::{fmt, EnvFilter};

use fundingdesk::analytics::{
    clamp_page, filter_by_team, paginate, sample_analyses, total_pages, FundAnalysis,
};
use fundingdesk::replies::{create_selector, FixedDelayScheduler, ReplyScheduler};
use fundingdesk::sessions::{InMemorySessionStore, Message, Sender, SessionStore};
use fundingdesk::teams::{StaticTeamRegistry, TeamRegistry};
use fundingdesk::{AnalyticsCommands, Config, Desk, TeamCommands};

/// `FundingDesk` - funding-analysis assistant and analytics, in your terminal.
#[derive(Parser, Debug)]
#[command(name = "fundingdesk")]
#[command(version)]
#[command(about = "Conversational funding analysis with team-scoped analytics.", long_about = None)]
struct Cli {
    /// Path to config.toml (overrides FUNDINGDESK_CONFIG and the default)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive analysis chat
    #[command(long_about = "\
Start an interactive analysis chat.

Opens a session for the selected team and simulates an analyst reply \
to every message. Sidebar actions are available as slash commands; \
type /help inside the chat to list them.

Examples:
  fundingdesk chat
  fundingdesk chat --team 2
  fundingdesk chat --seed 42 --delay-ms 0")]
    Chat {
        /// Team id to open the chat for; defaults to the first configured team
        #[arg(short, long)]
        team: Option<String>,

        /// Fixed RNG seed for reply selection (deterministic replies)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated reply latency in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Browse fund analyses (filtered, paginated)
    Analytics {
        #[command(subcommand)]
        analytics_command: AnalyticsCommands,
    },

    /// Manage teams
    Teams {
        #[command(subcommand)]
        team_command: TeamCommands,
    },

    /// Show effective configuration and data summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging - respects RUST_LOG env var, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Chat {
            team,
            seed,
            delay_ms,
        } => run_chat(config, team, seed, delay_ms).await,
        Commands::Analytics { analytics_command } => {
            handle_analytics_command(analytics_command, &config)
        }
        Commands::Teams { team_command } => handle_team_command(team_command, &config),
        Commands::Status => {
            let analyses = sample_analyses();
            println!("FundingDesk Status");
            println!();
            println!("Version:        {}", env!("CARGO_PKG_VERSION"));
            println!("Config:         {}", config.config_path.display());
            println!();
            println!(
                "Teams:          {} ({})",
                config.teams.len(),
                config
                    .teams
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("Fund analyses:  {} rows", analyses.len());
            println!("Page size:      {}", config.analytics.page_size);
            println!();
            println!("Reply latency:  {} ms", config.chat.reply_delay_ms);
            println!(
                "Reply seed:     {}",
                config
                    .chat
                    .reply_seed
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "(entropy)".to_string())
            );
            println!("Title preview:  {} chars", config.chat.title_preview_chars);
            Ok(())
        }
    }
}

fn build_desk(config: &Config, seed: Option<u64>, delay_ms: Option<u64>) -> Desk {
    let registry: Arc<dyn TeamRegistry> =
        Arc::new(StaticTeamRegistry::new(config.teams.clone()));
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::with_title_preview(
        config.chat.title_preview_chars,
    ));
    let selector = create_selector(seed.or(config.chat.reply_seed));
    let scheduler: Arc<dyn ReplyScheduler> = Arc::new(FixedDelayScheduler::new(
        Arc::clone(&store),
        selector,
        Duration::from_millis(delay_ms.unwrap_or(config.chat.reply_delay_ms)),
    ));
    Desk::new(
        registry,
        store,
        scheduler,
        sample_analyses(),
        config.analytics.page_size,
    )
}

async fn run_chat(
    config: Config,
    team: Option<String>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let desk = build_desk(&config, seed, delay_ms);
    if let Some(team_id) = &team {
        desk.select_team(team_id)?;
    }

    let session = desk.new_session().await?;
    if let Some(team) = desk.current_team() {
        println!(
            "{}",
            style(format!("Analysis chat for {} — /help for commands", team.name)).dim()
        );
    }
    for message in &session.messages {
        print_message(message);
    }

    let theme = ColorfulTheme::default();
    loop {
        let input = Input::<String>::with_theme(&theme)
            .with_prompt("you")
            .allow_empty(true)
            .interact_text();
        // Ctrl-C / closed stdin ends the chat.
        let Ok(line) = input else { break };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('/') {
            if handle_slash_command(&desk, trimmed).await? {
                break;
            }
            continue;
        }

        match desk.send(&line).await {
            Ok(_) => {
                println!("{}", style("analyzing data...").dim());
                desk.flush_replies().await;
                let transcript = desk.transcript().await;
                if let Some(reply) = transcript.last() {
                    print_message(reply);
                }
            }
            Err(err) => {
                // Recoverable: log it, drop the message, keep going.
                tracing::debug!(%err, "message not sent");
                println!("{}", style(format!("({err} — /new to start one)")).dim());
            }
        }
    }
    Ok(())
}

/// Handle a `/command` in the chat loop. Returns true to quit.
async fn handle_slash_command(desk: &Desk, input: &str) -> Result<bool> {
    let (command, args) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command {
        "/quit" | "/exit" => return Ok(true),
        "/help" => {
            println!("  /new              start a session for the current team");
            println!("  /sessions         list sessions for the current team");
            println!("  /switch <n|id>    make a listed session active");
            println!("  /rename <title>   rename the active session");
            println!("  /delete           delete the active session");
            println!("  /teams            list teams");
            println!("  /team <id>        switch the selected team");
            println!("  /analytics [page] show a page of fund analyses");
            println!("  /quit             leave the chat");
        }
        "/new" => match desk.new_session().await {
            Ok(session) => println!("{}", style(format!("started {}", session.title)).dim()),
            Err(err) => println!("{}", style(format!("({err})")).dim()),
        },
        "/sessions" => {
            let sessions = desk.sessions().await;
            let active = desk.active_session().await.map(|s| s.id);
            if sessions.is_empty() {
                println!("{}", style("(no sessions for this team)").dim());
            }
            for (index, session) in sessions.iter().enumerate() {
                let marker = if Some(&session.id) == active.as_ref() {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {}. {} ({} messages)",
                    index + 1,
                    session.title,
                    session.messages.len()
                );
            }
        }
        "/switch" => {
            let sessions = desk.sessions().await;
            let target = match args.parse::<usize>() {
                Ok(n) if n >= 1 && n <= sessions.len() => Some(sessions[n - 1].id.clone()),
                _ => sessions
                    .iter()
                    .find(|s| s.id == args)
                    .map(|s| s.id.clone()),
            };
            match target {
                Some(id) => {
                    desk.switch_session(&id).await?;
                    if let Some(session) = desk.active_session().await {
                        println!("{}", style(format!("switched to {}", session.title)).dim());
                    }
                }
                None => println!("{}", style("(no such session — try /sessions)").dim()),
            }
        }
        "/rename" => match desk.active_session().await {
            Some(session) => match desk.rename_session(&session.id, args).await {
                Ok(()) => println!("{}", style(format!("renamed to {}", args.trim())).dim()),
                Err(err) => {
                    tracing::debug!(%err, "rename ignored");
                    println!("{}", style(format!("({err})")).dim());
                }
            },
            None => println!("{}", style("(no active session)").dim()),
        },
        "/delete" => match desk.active_session().await {
            Some(session) => {
                desk.delete_session(&session.id).await?;
                println!("{}", style(format!("deleted {}", session.title)).dim());
            }
            None => println!("{}", style("(no active session)").dim()),
        },
        "/teams" => {
            let current = desk.current_team().map(|t| t.id);
            for team in desk.teams() {
                let marker = if Some(&team.id) == current.as_ref() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {} — {}", team.id, team.name);
            }
        }
        "/team" => match desk.select_team(args) {
            Ok(()) => {
                // Re-listing realigns the active session with the new team.
                let sessions = desk.sessions().await;
                if let Some(team) = desk.current_team() {
                    println!(
                        "{}",
                        style(format!(
                            "now viewing {} ({} sessions)",
                            team.name,
                            sessions.len()
                        ))
                        .dim()
                    );
                }
            }
            Err(err) => println!("{}", style(format!("({err})")).dim()),
        },
        "/analytics" => {
            let requested = args.parse::<usize>().unwrap_or(1);
            let page = desk.analyses_page(requested);
            print_analyses(&page.rows);
            println!(
                "{}",
                style(format!("page {} of {}", page.page, page.total_pages.max(1))).dim()
            );
        }
        other => println!("{}", style(format!("(unknown command {other})")).dim()),
    }
    Ok(false)
}

fn print_message(message: &Message) {
    match message.sender {
        Sender::User => println!("{} {}", style("you:").cyan().bold(), message.text),
        Sender::Assistant => {
            println!("{} {}", style("analyst:").green().bold(), message.text);
        }
    }
}

fn print_analyses(rows: &[FundAnalysis]) {
    if rows.is_empty() {
        println!("{}", style("(no fund analyses for this team)").dim());
        return;
    }
    for row in rows {
        println!(
            "{}  {}  [{}]",
            style(&row.isin).cyan(),
            row.fund_name,
            row.status
        );
        println!(
            "    {} | fees {} | perf {} | risk {} | {} | {}",
            row.metadata.strategy,
            row.metadata.fees,
            row.metadata.performance,
            row.metadata.risk_metrics,
            row.created_by,
            row.analysis_date
        );
    }
}

fn handle_analytics_command(command: AnalyticsCommands, config: &Config) -> Result<()> {
    match command {
        AnalyticsCommands::List {
            team,
            all_teams,
            page,
            page_size,
            json,
        } => {
            let rows = sample_analyses();
            // Default scope mirrors the dashboard: the first team is selected
            // at startup.
            let team_filter = if all_teams {
                None
            } else {
                team.or_else(|| config.teams.first().map(|t| t.id.clone()))
            };
            let scoped: Vec<&FundAnalysis> =
                filter_by_team(&rows, team_filter.as_deref()).collect();

            let size = page_size.unwrap_or(config.analytics.page_size);
            let total = total_pages(scoped.len(), size);
            let current = clamp_page(page, total);
            let page_rows = paginate(&scoped, size, current);

            if json {
                println!("{}", serde_json::to_string_pretty(&page_rows)?);
            } else {
                let owned: Vec<FundAnalysis> =
                    page_rows.iter().map(|row| (*row).clone()).collect();
                print_analyses(&owned);
                println!("Page {current} of {total}");
            }
            Ok(())
        }
    }
}

fn handle_team_command(command: TeamCommands, config: &Config) -> Result<()> {
    match command {
        TeamCommands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config.teams)?);
            } else {
                for team in &config.teams {
                    println!("{} — {}", team.id, team.name);
                }
            }
            Ok(())
        }
    }
}
