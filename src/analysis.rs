//! Directory-size queries and the disk usage report
//!
//! All queries here are read-only passes over an already aggregated
//! [`FsTree`]; [`crate::transcript::replay`] hands trees out with sizes
//! filled in.

use serde::Serialize;

use crate::tree::FsTree;

/// Directories at or below this size count toward the small-directory total.
pub const SMALL_DIR_LIMIT: u64 = 100_000;

/// Total capacity of the disk the transcript was recorded on.
pub const DISK_CAPACITY: u64 = 70_000_000;

/// Free space the next update needs.
pub const MIN_FREE: u64 = 30_000_000;

/// Sum the sizes of every directory (root included) no larger than `limit`.
///
/// Nested directories count separately, so files below several qualifying
/// directories contribute once per ancestor. That is the intended
/// semantics of the total, not double-counting.
pub fn sum_small_dirs(tree: &FsTree, limit: u64) -> u64 {
    tree.dirs()
        .map(|(_, dir)| dir.size)
        .filter(|&size| size <= limit)
        .sum()
}

/// Smallest directory size at or above `floor`, `None` if no directory
/// qualifies.
///
/// Only the value is reported; when several directories tie, they are
/// indistinguishable here.
pub fn min_dir_at_least(tree: &FsTree, floor: u64) -> Option<u64> {
    tree.dirs()
        .map(|(_, dir)| dir.size)
        .filter(|&size| size >= floor)
        .min()
}

/// Policy values for [`UsageReport::compute`].
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Threshold for the small-directory total.
    pub small_limit: u64,
    /// Total disk capacity.
    pub capacity: u64,
    /// Free space that must be available after deleting a directory.
    pub min_free: u64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            small_limit: SMALL_DIR_LIMIT,
            capacity: DISK_CAPACITY,
            min_free: MIN_FREE,
        }
    }
}

/// The two headline answers plus the intermediate figures they derive from.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    /// Total size of the root directory.
    pub used: u64,
    /// Disk capacity the report was computed against.
    pub capacity: u64,
    /// Capacity minus used space.
    pub free: u64,
    /// Space that still has to be freed to reach the minimum.
    pub need_to_free: u64,
    /// Threshold used for the small-directory total.
    pub small_limit: u64,
    /// Sum of the sizes of all directories at or below the threshold.
    pub small_dir_total: u64,
    /// Size of the smallest single directory whose deletion frees enough
    /// space. `None` only when even deleting the root would not suffice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_candidate: Option<u64>,
}

impl UsageReport {
    /// Compute the report for an aggregated tree.
    ///
    /// `free` and `need_to_free` use saturating arithmetic: a tree larger
    /// than the configured capacity reports zero free space, and once
    /// enough space is already free the deletion requirement is zero (the
    /// smallest directory overall, usually an empty one, then qualifies).
    pub fn compute(tree: &FsTree, options: &ReportOptions) -> Self {
        let used = tree.node(tree.root()).size;
        let free = options.capacity.saturating_sub(used);
        let need_to_free = options.min_free.saturating_sub(free);

        Self {
            used,
            capacity: options.capacity,
            free,
            need_to_free,
            small_limit: options.small_limit,
            small_dir_total: sum_small_dirs(tree, options.small_limit),
            delete_candidate: min_dir_at_least(tree, need_to_free),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::replay_str;

    const SESSION: &str = "\
$ cd /
$ ls
dir a
14848514 b.txt
8504156 c.dat
dir d
$ cd a
$ ls
dir e
29116 f
2557 g
62596 h.lst
$ cd e
$ ls
584 i
$ cd ..
$ cd ..
$ cd d
$ ls
4060174 j
8033020 d.log
5626152 d.ext
7214296 k
";

    #[test]
    fn test_small_dir_total_for_session() {
        let tree = replay_str(SESSION).unwrap();
        // a (94853) and e (584) qualify; root and d exceed the limit.
        assert_eq!(sum_small_dirs(&tree, SMALL_DIR_LIMIT), 95_437);
    }

    #[test]
    fn test_sum_small_dirs_is_monotonic() {
        let tree = replay_str(SESSION).unwrap();
        let mut previous = 0;
        for limit in [0, 584, 94_853, 100_000, 25_000_000, u64::MAX] {
            let total = sum_small_dirs(&tree, limit);
            assert!(total >= previous, "total shrank at limit {limit}");
            previous = total;
        }
    }

    #[test]
    fn test_min_dir_at_least() {
        let tree = replay_str(SESSION).unwrap();
        assert_eq!(min_dir_at_least(&tree, 8_381_165), Some(24_933_642));
        assert_eq!(min_dir_at_least(&tree, 0), Some(584));
        // Nothing is bigger than the root.
        assert_eq!(min_dir_at_least(&tree, 48_381_166), None);
    }

    #[test]
    fn test_report_with_default_policy() {
        let tree = replay_str(SESSION).unwrap();
        let report = UsageReport::compute(&tree, &ReportOptions::default());

        assert_eq!(report.used, 48_381_165);
        assert_eq!(report.free, 21_618_835);
        assert_eq!(report.need_to_free, 8_381_165);
        assert_eq!(report.small_dir_total, 95_437);
        assert_eq!(report.delete_candidate, Some(24_933_642));
    }

    #[test]
    fn test_report_when_enough_space_is_free() {
        let tree = replay_str("$ cd /\n$ ls\ndir a\n100 f\n").unwrap();
        let report = UsageReport::compute(&tree, &ReportOptions::default());

        assert_eq!(report.need_to_free, 0);
        // The empty directory `a` is the smallest deletion candidate.
        assert_eq!(report.delete_candidate, Some(0));
    }

    #[test]
    fn test_report_saturates_when_tree_exceeds_capacity() {
        let tree = replay_str("$ cd /\n$ ls\n500 f\n").unwrap();
        let options = ReportOptions {
            small_limit: 100,
            capacity: 400,
            min_free: 300,
        };
        let report = UsageReport::compute(&tree, &options);

        assert_eq!(report.free, 0);
        assert_eq!(report.need_to_free, 300);
        assert_eq!(report.small_dir_total, 0);
        assert_eq!(report.delete_candidate, Some(500));
    }
}
