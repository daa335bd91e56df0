//! Test utilities for composing transcripts programmatically.
//!
//! This module is only compiled for tests and benchmarks.

/// Builds a transcript line by line.
///
/// Keeps tests and benches free of hand-maintained multi-line string
/// literals when the shape of the session matters more than its text.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    lines: Vec<String>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `$ cd <target>`.
    pub fn cd(mut self, target: &str) -> Self {
        self.lines.push(format!("$ cd {}", target));
        self
    }

    /// Append `$ ls`.
    pub fn ls(mut self) -> Self {
        self.lines.push("$ ls".to_string());
        self
    }

    /// Append a `dir <name>` listing entry.
    pub fn dir(mut self, name: &str) -> Self {
        self.lines.push(format!("dir {}", name));
        self
    }

    /// Append a `<size> <name>` listing entry.
    pub fn file(mut self, size: u64, name: &str) -> Self {
        self.lines.push(format!("{} {}", size, name));
        self
    }

    /// Append a raw line verbatim, for deliberately malformed input.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut transcript = self.lines.join("\n");
        transcript.push('\n');
        transcript
    }
}

/// A session that walks straight down `depth` nested directories, listing
/// `files_per_dir` files in each.
pub fn deep_session(depth: usize, files_per_dir: usize) -> String {
    let mut builder = TranscriptBuilder::new().cd("/");
    for level in 0..depth {
        builder = builder.ls();
        for file in 0..files_per_dir {
            builder = builder.file(1000 + file as u64, &format!("f{}_{}", level, file));
        }
        builder = builder.dir(&format!("d{}", level)).cd(&format!("d{}", level));
    }
    builder.build()
}

/// A session that lists `dirs` sibling directories under the root and
/// visits each one in turn.
pub fn wide_session(dirs: usize, files_per_dir: usize) -> String {
    let mut builder = TranscriptBuilder::new().cd("/").ls();
    for dir in 0..dirs {
        builder = builder.dir(&format!("d{}", dir));
    }
    for dir in 0..dirs {
        builder = builder.cd(&format!("d{}", dir)).ls();
        for file in 0..files_per_dir {
            builder = builder.file(1000 + file as u64, &format!("f{}", file));
        }
        builder = builder.cd("..");
    }
    builder.build()
}
