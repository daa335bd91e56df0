//! Duplay - replays recorded shell sessions and reports directory disk usage

pub mod analysis;
pub mod marker;
pub mod output;
pub mod transcript;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::{ReportOptions, UsageReport, min_dir_at_least, sum_small_dirs};
pub use marker::find_marker;
pub use output::{format_tree, json_tree, print_json, print_report, print_tree};
pub use transcript::{TranscriptError, replay, replay_str};
pub use tree::{DirNode, FsTree, NodeIndex};
