//! # CLI Behavior
//!
//! This is **one possible client** of the review engine. It is the only place
//! that knows about terminal I/O, exit codes and output formatting.
//!
//! ## Commands
//!
//! - `spaced rate <ITEM> <RATING> [--skill S]`: rate an item (0 fail, 1 hard, 2 good)
//! - `spaced attempt <SKILL> <RATING>`: record a mastery attempt
//! - `spaced mastery`: per-skill mastery percentages
//! - `spaced due [--now EPOCH]`: items due for review
//! - `spaced next [--now EPOCH] [--limit N]`: due items, lowest mastery first
//! - `spaced init`: create an empty store
//! - `spaced config`: show resolved configuration
//!
//! Running `spaced` with no arguments defaults to `spaced due`.
//!
//! ## Output
//!
//! `--output text` (default) prints styled lines; `--output json` prints the
//! structured value, and on failure `{"error": {"code", "message"}}`.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context wiring, dispatch and per-command handlers
//! - `render`: Text and JSON formatting
//! - `styles`: Terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
