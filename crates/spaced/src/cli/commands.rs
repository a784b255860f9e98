//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve scope, configuration and store via `spacedapp::init`
//! 3. **Dispatch**: Route commands to the API
//! 4. **Output Formatting**: Text or JSON through `render`
//! 5. **Error Handling**: JSON error bodies in `--output json`, plain messages otherwise

use super::render::{self, ConfigView};
use super::setup::{Cli, Commands, OutputMode};
use clap::Parser;
use spacedapp::api::{CmdMessage, RateRequest};
use spacedapp::error::Result;
use spacedapp::init::{initialize, SpacedContext};
use spacedapp::model::Rating;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive, e.g. `spacedapp=debug`.
const LOG_ENV: &str = "SPACED_LOG";

struct AppState {
    ctx: SpacedContext,
    output: OutputMode,
}

impl AppState {
    fn json_pretty(&self) -> bool {
        self.ctx.config.output.json_pretty
    }

    /// Print either the structured value or the text form plus messages.
    fn emit<T: serde::Serialize>(
        &self,
        value: &T,
        text: String,
        messages: &[CmdMessage],
    ) -> Result<()> {
        match self.output {
            OutputMode::Json => println!("{}", render::json(value, self.json_pretty())?),
            OutputMode::Text => {
                print!("{}", text);
                print!("{}", render::messages(messages));
            }
        }
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut json_pretty = true;
    let result = create_app_state(&cli).and_then(|mut state| {
        json_pretty = state.json_pretty();
        dispatch(&mut state, cli.command.as_ref())
    });

    if let Err(e) = &result {
        tracing::debug!(code = e.code(), "command failed");
        if cli.output == OutputMode::Json {
            println!("{}", render::error_json(e, json_pretty));
        }
    }
    result
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore an already-installed subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_app_state(cli: &Cli) -> Result<AppState> {
    let cwd = std::env::current_dir()?;
    let data_override = cli.data.as_ref().map(PathBuf::from);
    let ctx = initialize(&cwd, cli.global, data_override)?;
    Ok(AppState {
        ctx,
        output: cli.output,
    })
}

fn dispatch(state: &mut AppState, command: Option<&Commands>) -> Result<()> {
    match command {
        Some(Commands::Rate {
            item_id,
            rating,
            skill,
        }) => handle_rate(state, item_id, rating, skill.as_deref()),
        Some(Commands::Attempt { skill_id, rating }) => handle_attempt(state, skill_id, rating),
        Some(Commands::Mastery) => handle_mastery(state),
        Some(Commands::Due { now }) => handle_due(state, *now),
        Some(Commands::Next { now, limit }) => handle_next(state, *now, *limit),
        Some(Commands::Init) => handle_init(state),
        Some(Commands::Config) => handle_config(state),
        // Naked `spaced` shows what is due
        None => handle_due(state, None),
    }
}

fn handle_rate(state: &mut AppState, item_id: &str, rating: &str, skill: Option<&str>) -> Result<()> {
    let mut request = RateRequest::from_args(item_id, rating);
    if let Some(skill) = skill {
        request = request.with_skill(skill);
    }
    let result = state.ctx.api.submit_rating(&request)?;
    state.emit(&result.value, render::rating(&result.value), &result.messages)
}

fn handle_attempt(state: &mut AppState, skill_id: &str, rating: &str) -> Result<()> {
    let rating: Rating = rating.parse()?;
    let result = state.ctx.api.record_attempt(skill_id, rating)?;
    state.emit(&result.value, render::attempt(&result.value), &result.messages)
}

fn handle_mastery(state: &mut AppState) -> Result<()> {
    let result = state.ctx.api.mastery_snapshot()?;
    state.emit(&result.value, render::mastery(&result.value), &result.messages)
}

fn handle_due(state: &mut AppState, now: Option<i64>) -> Result<()> {
    let result = match now {
        Some(now) => state.ctx.api.due_items_at(now)?,
        None => state.ctx.api.due_items()?,
    };
    state.emit(&result.value, render::due(&result.value), &result.messages)
}

fn handle_next(state: &mut AppState, now: Option<i64>, limit: Option<usize>) -> Result<()> {
    let result = match now {
        Some(now) => state.ctx.api.recommend_at(now, limit)?,
        None => state.ctx.api.recommend(limit)?,
    };
    state.emit(&result.value, render::recommendations(&result.value), &result.messages)
}

fn handle_init(state: &mut AppState) -> Result<()> {
    let result = state.ctx.api.init()?;
    let value = serde_json::json!({
        "created": result.value,
        "path": state.ctx.data_path,
    });
    state.emit(&value, String::new(), &result.messages)
}

fn handle_config(state: &mut AppState) -> Result<()> {
    let view = ConfigView {
        scope: state.ctx.scope,
        data_path: &state.ctx.data_path,
        config: &state.ctx.config,
    };
    state.emit(&view, render::config(&view), &[])
}
