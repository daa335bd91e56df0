//! Transcript replay - drives the line grammar over a session log and
//! materializes the directory tree it describes.

use std::io::BufRead;

use tracing::debug;

use crate::tree::{FsTree, NodeIndex};

use super::TranscriptError;
use super::line::{CdTarget, Command, Entry, PROMPT, parse_command, parse_entry};

/// What kind of line the interpreter expects next.
///
/// `ReadingListing` is entered by `ls` and exits back to `AwaitingCommand`
/// at the next prompt line or end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingCommand,
    ReadingListing,
}

/// Replay a transcript from a reader into a fully aggregated [`FsTree`].
///
/// Consumes the whole input, then runs the size aggregation pass exactly
/// once, so every directory in the returned tree carries its total size.
/// The first non-conforming line aborts with a [`TranscriptError`]; no
/// partial tree is returned.
pub fn replay<R: BufRead>(reader: R) -> Result<FsTree, TranscriptError> {
    let mut interpreter = Interpreter::new();
    for (index, line) in reader.lines().enumerate() {
        interpreter.feed(index + 1, &line?)?;
    }
    Ok(interpreter.finish())
}

/// Replay a transcript held in memory. Convenience wrapper over [`replay`].
pub fn replay_str(transcript: &str) -> Result<FsTree, TranscriptError> {
    replay(transcript.as_bytes())
}

/// One-pass transcript interpreter: a tree under construction, a cursor,
/// and the two-state line dispatcher.
struct Interpreter {
    tree: FsTree,
    cursor: NodeIndex,
    state: State,
}

impl Interpreter {
    fn new() -> Self {
        let tree = FsTree::new();
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            state: State::AwaitingCommand,
        }
    }

    /// Dispatch a single line according to the current state.
    fn feed(&mut self, number: usize, line: &str) -> Result<(), TranscriptError> {
        match self.state {
            State::AwaitingCommand => {
                let rest =
                    line.strip_prefix(PROMPT)
                        .ok_or_else(|| TranscriptError::ExpectedPrompt {
                            line: number,
                            found: line.to_string(),
                        })?;
                self.apply_command(parse_command(rest, number)?);
            }
            State::ReadingListing => {
                if let Some(rest) = line.strip_prefix(PROMPT) {
                    self.apply_command(parse_command(rest, number)?);
                } else if line.starts_with('$') {
                    // A `$` without the trailing space is a broken prompt,
                    // not a listing entry.
                    return Err(TranscriptError::ExpectedPrompt {
                        line: number,
                        found: line.to_string(),
                    });
                } else {
                    self.apply_entry(parse_entry(line, number)?);
                }
            }
        }
        Ok(())
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::Cd(target) => {
                self.state = State::AwaitingCommand;
                self.apply_cd(target);
            }
            Command::Ls => {
                debug!(dir = %self.tree.node(self.cursor).name, "listing");
                self.state = State::ReadingListing;
            }
        }
    }

    fn apply_cd(&mut self, target: CdTarget) {
        match target {
            CdTarget::Root => {
                self.cursor = self.tree.root();
                debug!("cursor reset to root");
            }
            CdTarget::Parent => match self.tree.parent(self.cursor) {
                Some(parent) => self.cursor = parent,
                // Ascending past the root is a silent no-op.
                None => debug!("`cd ..` at root ignored"),
            },
            CdTarget::Named(name) => {
                // The transcript may enter a directory before listing it,
                // so `cd` creates missing children just like `dir` entries.
                self.cursor = self.tree.find_or_create_dir(self.cursor, &name);
            }
        }
    }

    fn apply_entry(&mut self, entry: Entry) {
        match entry {
            Entry::Dir(name) => {
                self.tree.find_or_create_dir(self.cursor, &name);
            }
            Entry::File { name, size } => self.tree.add_file(self.cursor, &name, size),
        }
    }

    /// Finish the replay: run the aggregation pass and hand the tree out.
    fn finish(mut self) -> FsTree {
        self.tree.aggregate_sizes();
        self.tree
    }
}
