//! Clap derive structures for the `helloface` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use helloface_core::UserId;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// helloface -- enroll and recognize faces against a HelloFace service
#[derive(Debug, Parser)]
#[command(
    name = "helloface",
    version,
    about = "Enroll and recognize faces from the command line",
    long_about = "A client for the HelloFace face recognition service.\n\n\
        Enrolls people from a photo, identifies whoever is in a photo,\n\
        and manages the enrolled user directory.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Service profile to use
    #[arg(long, short = 'p', env = "HELLOFACE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service URL (overrides profile)
    #[arg(long, short = 'u', env = "HELLOFACE_URL", global = true)]
    pub url: Option<String>,

    /// Bearer token for services behind an auth proxy
    #[arg(long, env = "HELLOFACE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HELLOFACE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HELLOFACE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show service health and enrollment statistics
    #[command(alias = "st")]
    Status,

    /// Enroll a new person from a photo
    #[command(alias = "e")]
    Enroll(EnrollArgs),

    /// Identify the person in a photo
    #[command(alias = "r")]
    Recognize(RecognizeArgs),

    /// Manage enrolled users
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Workflows ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EnrollArgs {
    /// Photo containing exactly one face (JPEG, PNG or WebP)
    #[arg(long, short = 'i')]
    pub image: PathBuf,

    /// Display name (prompted for when omitted on a terminal)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Contact email (prompted for when omitted on a terminal)
    #[arg(long, short = 'e')]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct RecognizeArgs {
    /// Photo to identify (JPEG, PNG or WebP)
    #[arg(long, short = 'i')]
    pub image: PathBuf,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List enrolled users
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over name and email
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },

    /// Delete a user and their face data
    #[command(alias = "rm")]
    Delete {
        /// User ID
        id: UserId,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (tokens redacted)
    Show,

    /// Set a value on the active profile
    Set {
        /// Config key (base_url, api_token, api_token_env, timeout, auto_reset_secs)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
