#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::map_unwrap_or,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::return_self_not_must_use,
    clippy::similar_names,
    clippy::struct_field_names,
    clippy::uninlined_format_args,
    clippy::unnecessary_map_or
)]

use clap::Subcommand;
use serde::{Deserialize, Serialize};

pub mod analytics;
pub mod config;
pub mod desk;
pub mod replies;
pub mod sessions;
pub mod teams;

pub use config::Config;
pub use desk::{AnalyticsPage, Desk};

/// Analytics subcommands
#[derive(Subcommand, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnalyticsCommands {
    /// List fund analyses for a team
    #[command(long_about = "\
List fund analyses for a team, one page at a time.

Rows are scoped to a single team (the first configured team unless \
--team or --all-teams says otherwise) and sliced into fixed-size pages.

Examples:
  fundingdesk analytics list
  fundingdesk analytics list --team 2 --page 1
  fundingdesk analytics list --all-teams --page-size 3 --json")]
    List {
        /// Team id to scope to; defaults to the first configured team
        #[arg(long)]
        team: Option<String>,
        /// Ignore team scoping and list every row
        #[arg(long)]
        all_teams: bool,
        /// 1-indexed page to show (clamped into range)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page; defaults to the configured page size
        #[arg(long)]
        page_size: Option<usize>,
        /// Emit the page as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Team subcommands
#[derive(Subcommand, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TeamCommands {
    /// List the configured teams
    List {
        /// Emit the roster as JSON
        #[arg(long)]
        json: bool,
    },
}
