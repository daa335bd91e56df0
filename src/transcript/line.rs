//! Line grammar for session transcripts

use compact_str::CompactString;

use super::TranscriptError;

/// Marker that opens every command line.
pub const PROMPT: &str = "$ ";

/// Target of a `cd` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdTarget {
    /// `cd /`
    Root,
    /// `cd ..`
    Parent,
    /// `cd <name>`
    Named(CompactString),
}

/// A command carried by a prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Cd(CdTarget),
    Ls,
}

/// A single line of `ls` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `dir <name>`
    Dir(CompactString),
    /// `<size> <name>`
    File { name: CompactString, size: u64 },
}

/// True for a usable name token: non-empty, no embedded whitespace.
fn is_name(token: &str) -> bool {
    !token.is_empty() && !token.contains(char::is_whitespace)
}

/// Parse the text after the `$ ` prompt as a command.
pub(crate) fn parse_command(rest: &str, line: usize) -> Result<Command, TranscriptError> {
    if rest == "ls" {
        return Ok(Command::Ls);
    }

    if rest == "cd" || rest.starts_with("cd ") {
        let target = rest[2..].trim_start_matches(' ');
        return match target {
            "/" => Ok(Command::Cd(CdTarget::Root)),
            ".." => Ok(Command::Cd(CdTarget::Parent)),
            name if is_name(name) => Ok(Command::Cd(CdTarget::Named(CompactString::new(name)))),
            _ => Err(TranscriptError::BadCdTarget {
                line,
                found: target.to_string(),
            }),
        };
    }

    Err(TranscriptError::UnknownCommand {
        line,
        found: rest.to_string(),
    })
}

/// Parse a listing line as a `dir` or file entry.
pub(crate) fn parse_entry(text: &str, line: usize) -> Result<Entry, TranscriptError> {
    if let Some(name) = text.strip_prefix("dir ") {
        if is_name(name) {
            return Ok(Entry::Dir(CompactString::new(name)));
        }
        return Err(TranscriptError::MalformedEntry {
            line,
            found: text.to_string(),
        });
    }

    let Some((size_token, name)) = text.split_once(' ') else {
        return Err(TranscriptError::MalformedEntry {
            line,
            found: text.to_string(),
        });
    };

    if !is_name(name) {
        return Err(TranscriptError::MalformedEntry {
            line,
            found: text.to_string(),
        });
    }

    let size: u64 = size_token
        .parse()
        .map_err(|_| TranscriptError::InvalidFileSize {
            line,
            token: size_token.to_string(),
        })?;

    if size == 0 {
        return Err(TranscriptError::ZeroFileSize {
            line,
            name: name.to_string(),
        });
    }

    Ok(Entry::File {
        name: CompactString::new(name),
        size,
    })
}
