use clap::{Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "spaced", bin_name = "spaced", version, disable_help_subcommand = true)]
#[command(about = "Spaced-repetition review scheduling and skill mastery tracking", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Operate on the global store instead of the project store
    #[arg(short, long, global = true, help_heading = "Options")]
    pub global: bool,

    /// Explicit store file (with extension) or directory
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Text, help_heading = "Options")]
    pub output: OutputMode,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rate a review item: 0 (fail), 1 (hard) or 2 (good)
    #[command(alias = "r")]
    Rate {
        /// Item identifier
        item_id: String,

        /// Rating: 0, 1 or 2
        #[arg(allow_hyphen_values = true)]
        rating: String,

        /// Also count the rating as a mastery attempt for this skill
        #[arg(short, long)]
        skill: Option<String>,
    },

    /// Record a mastery attempt for a skill
    #[command(alias = "a")]
    Attempt {
        /// Skill identifier
        skill_id: String,

        /// Rating: 0, 1 or 2
        #[arg(allow_hyphen_values = true)]
        rating: String,
    },

    /// Show mastery percentage per skill
    #[command(alias = "m")]
    Mastery,

    /// List items due for review
    #[command(alias = "d")]
    Due {
        /// Evaluate at this epoch-seconds timestamp instead of now
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,
    },

    /// Due items ordered weakest first
    #[command(alias = "n")]
    Next {
        /// Evaluate at this epoch-seconds timestamp instead of now
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,

        /// Show at most this many items
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Create an empty store
    Init,

    /// Show the resolved configuration and store location
    Config,
}
