use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "rehome",
    version,
    about,
    long_about = "Terminal client for the rehome pet-adoption classifieds"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Base URL of the classifieds service API
    #[arg(long, short, env = "REHOME_API_URL")]
    pub api_url: Option<String>,

    /// Path to the session file
    #[arg(long, env = "REHOME_SESSION")]
    pub session_path: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Log in and store the session
    Login(LoginArgs),
    /// Log out and discard the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create an account
    Register(RegisterArgs),
    /// Browse ads of pets seeking a home
    Seek(SeekArgs),
    /// Favorite ads
    #[clap(subcommand)]
    Favorites(FavoritesCommand),
    /// Your own ads
    #[clap(subcommand)]
    Ad(AdCommand),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account username
    #[arg(long, short)]
    pub username: String,
    /// Account password
    #[arg(long, short, env = "REHOME_PASSWORD")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account username
    #[arg(long, short)]
    pub username: String,
    /// Account password
    #[arg(long, short, env = "REHOME_PASSWORD")]
    pub password: String,
    /// Name shown on your ads
    #[arg(long, short)]
    pub display_name: String,
    /// Contact email
    #[arg(long, short)]
    pub email: String,
    /// Contact phone (digits and hyphens)
    #[arg(long)]
    pub phone: String,
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Pretty,
    Plain,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Pretty
    }
}

#[derive(Debug, Args, PartialEq)]
pub struct ListingArgs {
    /// Page to show
    #[arg(long, short, default_value_t = 1)]
    pub page: usize,

    /// Ads per page
    #[arg(long, default_value_t = 10)]
    pub per_page: usize,

    /// Keep the listing open and page through it interactively
    #[arg(long, short, default_value_t = false)]
    pub interactive: bool,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct SeekArgs {
    /// Show only this category
    #[arg(long, short)]
    pub category: Option<String>,

    #[command(flatten)]
    pub listing: ListingArgs,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List your favorite ads
    List(ListingArgs),
    /// Add an ad to your favorites
    Add {
        /// Ad id
        ad_id: i64,
    },
    /// Remove an ad from your favorites
    Remove {
        /// Ad id
        ad_id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdCommand {
    /// Create a new ad
    Create(AdCreateArgs),
    /// List the ads you created
    Mine(ListingArgs),
    /// Delete one of your ads
    Delete {
        /// Ad id
        ad_id: i64,
    },
}

#[derive(Debug, Args)]
pub struct AdCreateArgs {
    /// Pet category (e.g. Dog, Cat, Bird)
    #[arg(long, short)]
    pub category: String,

    /// Pet name
    #[arg(long, short)]
    pub name: String,

    /// Pet age in years
    #[arg(long, short)]
    pub age: f64,

    /// Pet gender
    #[arg(long, short, value_enum)]
    pub gender: Gender,

    /// Ad text (up to 500 characters)
    #[arg(long)]
    pub content: String,

    /// Image file to attach (jpg/jpeg/png, up to 1 MB)
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Wire value expected by the service
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
