//! Shell transcript parsing and replay
//!
//! A transcript is the line-oriented log of an interactive session: `$ `
//! prompt lines carrying `cd`/`ls` commands, and the listing lines `ls`
//! printed. Replaying one reconstructs the directory tree the session
//! walked over.
//!
//! Parsing is fail-fast: the first line that does not fit the grammar
//! aborts the whole replay with a [`TranscriptError`] naming the line and
//! the offending token. There is no skip-and-continue and no invented
//! default for a bad size or name.

mod line;
mod replay;

use thiserror::Error;

pub use line::{CdTarget, Command, Entry, PROMPT};
pub use replay::{replay, replay_str};

/// A transcript line that does not conform to the session grammar.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// A line in command position does not start with the `$ ` prompt.
    #[error("line {line}: expected a `$ ` command prompt, found {found:?}")]
    ExpectedPrompt { line: usize, found: String },

    /// A prompt line names something other than `cd` or `ls`.
    #[error("line {line}: unknown command {found:?}, expected `cd` or `ls`")]
    UnknownCommand { line: usize, found: String },

    /// A `cd` without a usable target (missing, empty, or containing spaces).
    #[error("line {line}: `cd` expects a single target, found {found:?}")]
    BadCdTarget { line: usize, found: String },

    /// A listing line that is neither `dir <name>` nor `<size> <name>`.
    #[error("line {line}: listing entry {found:?} is neither `dir <name>` nor `<size> <name>`")]
    MalformedEntry { line: usize, found: String },

    /// A file entry whose size token is not a non-negative integer.
    #[error("line {line}: file size {token:?} is not a valid integer")]
    InvalidFileSize { line: usize, token: String },

    /// A file entry with size zero. Conforming transcripts never list
    /// zero-byte files; a zero size marks the transcript as corrupt.
    #[error("line {line}: file {name:?} has size zero")]
    ZeroFileSize { line: usize, name: String },

    /// The underlying reader failed.
    #[error("failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
}
