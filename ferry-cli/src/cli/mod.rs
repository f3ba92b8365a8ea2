//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers.

mod config;
mod list;
mod migrate;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use ferry_core::output::ColorMode;

/// Top-level CLI command for the ferry tool
#[derive(Parser)]
#[command(name = "ferry")]
#[command(display_name = "⛴ Ferry")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Move Jira issues from one project to another")]
#[command(long_about = "Ferry recreates Jira issues in a destination project.\n\n\
        Each issue is copied with its summary, description, priority and type,\n\
        its comments are replayed oldest first, its status is matched when the\n\
        destination workflow allows it, and the source issue is then deleted.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages (including raw Jira responses)"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Use this configuration file instead of the default location
  #[arg(long, global = true, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the ferry tool
#[derive(Subcommand)]
pub enum Commands {
  /// Move issues from a source project to a destination project
  #[command(long_about = "Move the first page of issues from SOURCE into DESTINATION.\n\n\
            Issues are handled one at a time: create, copy comments, match status,\n\
            then delete the source issue. The first failure stops the run and reports\n\
            which issues were already moved. Use --dry-run to see what would move\n\
            without changing anything.")]
  #[command(alias = "mv")]
  Migrate(migrate::MigrateArgs),

  /// List the issues a migration would pick up from a project
  #[command(alias = "ls")]
  List(list::ListArgs),

  /// Show or update the ferry configuration
  #[command(long_about = "Show or update the ferry configuration file.\n\n\
            The Jira API token is never printed and cannot be set here; put it in\n\
            the config file by hand, export JIRA_API_TOKEN, or use a .netrc entry.")]
  Config(config::ConfigArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  match cli.colors {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  let config_path = cli.config.as_deref();
  match cli.command {
    Commands::Migrate(args) => migrate::handle_migrate_command(args, config_path),
    Commands::List(args) => list::handle_list_command(args, config_path),
    Commands::Config(args) => config::handle_config_command(args, config_path),
  }
}
