//! # Command Layer
//!
//! Each operation lives in its own submodule and performs exactly one
//! load → mutate → (optional) save cycle against a [`ReviewStore`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Request validation**: inputs arrive as typed values ([`Rating`], ids);
//!   the API layer rejects malformed requests before a command runs.
//! - **Any I/O** beyond the store: no stdout, stderr or exit codes.
//! - **Retries**: an operation either fully succeeds or reports its error.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult<T>`]: the typed value plus [`CmdMessage`]s
//! with levels. The UI decides how to render both.
//!
//! ## Command Modules
//!
//! - [`rate`]: Schedule the next review of an item
//! - [`attempt`]: Record a mastery attempt for a skill
//! - [`mastery`]: Per-skill mastery percentages
//! - [`due`]: Items due for review
//! - [`recommend`]: Due items ordered by ascending mastery
//! - [`init`]: Create an empty store document
//!
//! [`ReviewStore`]: crate::store::ReviewStore
//! [`Rating`]: crate::model::Rating

use serde::Serialize;

pub mod attempt;
pub mod due;
pub mod init;
pub mod mastery;
pub mod rate;
pub mod recommend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdResult<T> {
    pub value: T,
    pub messages: Vec<CmdMessage>,
}

impl<T> CmdResult<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
