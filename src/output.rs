//! Report and tree rendering
//!
//! Formats the replayed tree and its usage report for the console
//! (with optional color) or as JSON.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::analysis::UsageReport;
use crate::tree::{FsTree, NodeIndex};

/// Serializable view of the reconstructed tree for `--json` output.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonNode {
    File {
        name: String,
        size: u64,
    },
    Dir {
        name: String,
        size: u64,
        children: Vec<JsonNode>,
    },
}

/// Build the nested JSON view of a tree, rooted at `/`.
pub fn json_tree(tree: &FsTree) -> JsonNode {
    json_dir(tree, tree.root())
}

fn json_dir(tree: &FsTree, index: NodeIndex) -> JsonNode {
    let node = tree.node(index);
    let mut children: Vec<JsonNode> = node
        .subdirs
        .values()
        .map(|&child| json_dir(tree, child))
        .collect();
    children.extend(node.files.iter().map(|(name, &size)| JsonNode::File {
        name: name.to_string(),
        size,
    }));
    JsonNode::Dir {
        name: node.name.to_string(),
        size: node.size,
        children,
    }
}

/// Print the report (and optionally the tree) as pretty-printed JSON.
pub fn print_json(report: &UsageReport, tree: Option<&FsTree>) -> io::Result<()> {
    #[derive(Serialize)]
    struct Payload<'a> {
        report: &'a UsageReport,
        #[serde(skip_serializing_if = "Option::is_none")]
        tree: Option<JsonNode>,
    }

    let payload = Payload {
        report,
        tree: tree.map(json_tree),
    };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

/// Print the usage report to stdout with optional color.
pub fn print_report(report: &UsageReport, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stdout.set_color(&bold)?;
    writeln!(stdout, "Disk Usage")?;
    stdout.reset()?;
    writeln!(stdout, "──────────")?;

    writeln!(stdout, "Used:          {:>14}", format_number(report.used))?;
    writeln!(
        stdout,
        "Capacity:      {:>14}",
        format_number(report.capacity)
    )?;
    writeln!(stdout, "Free:          {:>14}", format_number(report.free))?;
    writeln!(
        stdout,
        "Need to free:  {:>14}",
        format_number(report.need_to_free)
    )?;
    writeln!(stdout)?;

    let mut label = ColorSpec::new();
    label.set_fg(Some(Color::Cyan));

    stdout.set_color(&label)?;
    write!(
        stdout,
        "Directories no larger than {}: ",
        format_number(report.small_limit)
    )?;
    stdout.reset()?;
    writeln!(stdout, "{}", format_number(report.small_dir_total))?;

    stdout.set_color(&label)?;
    write!(stdout, "Smallest directory freeing enough space: ")?;
    stdout.reset()?;
    match report.delete_candidate {
        Some(size) => writeln!(stdout, "{}", format_number(size))?,
        None => writeln!(stdout, "none qualifies")?,
    }

    Ok(())
}

/// Print the reconstructed tree to stdout with optional color.
pub fn print_tree(tree: &FsTree, use_color: bool) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    let mut dir_color = ColorSpec::new();
    dir_color.set_fg(Some(Color::Blue)).set_bold(true);

    print_dir_entry(tree, tree.root(), "", &mut stdout, &dir_color)?;
    writeln!(stdout)?;
    writeln!(
        stdout,
        "{} directories, {} files",
        tree.dir_count(),
        tree.file_count()
    )?;
    Ok(())
}

/// Format the reconstructed tree as a plain string (no colors).
pub fn format_tree(tree: &FsTree) -> String {
    let mut output = String::new();
    format_dir_entry(tree, tree.root(), "", &mut output);
    output.push_str(&format!(
        "\n{} directories, {} files\n",
        tree.dir_count(),
        tree.file_count()
    ));
    output
}

/// A directory's children, directories and files merged in name order.
fn merged_children(tree: &FsTree, index: NodeIndex) -> Vec<(String, Option<NodeIndex>, u64)> {
    let node = tree.node(index);
    let mut children: Vec<(String, Option<NodeIndex>, u64)> = node
        .subdirs
        .iter()
        .map(|(name, &child)| (name.to_string(), Some(child), tree.node(child).size))
        .collect();
    children.extend(
        node.files
            .iter()
            .map(|(name, &size)| (name.to_string(), None, size)),
    );
    children.sort_by(|a, b| a.0.cmp(&b.0));
    children
}

fn print_dir_entry(
    tree: &FsTree,
    index: NodeIndex,
    prefix: &str,
    stdout: &mut StandardStream,
    dir_color: &ColorSpec,
) -> io::Result<()> {
    if prefix.is_empty() {
        stdout.set_color(dir_color)?;
        write!(stdout, "{}", tree.node(index).name)?;
        stdout.reset()?;
        writeln!(stdout, "  [{}]", format_size(tree.node(index).size))?;
    }

    let children = merged_children(tree, index);
    let count = children.len();
    for (i, (name, child, size)) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        write!(stdout, "{}{}", prefix, connector)?;
        match child {
            Some(child_index) => {
                stdout.set_color(dir_color)?;
                write!(stdout, "{}", name)?;
                stdout.reset()?;
                writeln!(stdout, "  [{}]", format_size(size))?;
                let extension = if last { "    " } else { "│   " };
                let child_prefix = format!("{}{}", prefix, extension);
                print_dir_entry(tree, child_index, &child_prefix, stdout, dir_color)?;
            }
            None => writeln!(stdout, "{}  [{}]", name, format_size(size))?,
        }
    }
    Ok(())
}

fn format_dir_entry(tree: &FsTree, index: NodeIndex, prefix: &str, output: &mut String) {
    if prefix.is_empty() {
        output.push_str(&format!(
            "{}  [{}]\n",
            tree.node(index).name,
            format_size(tree.node(index).size)
        ));
    }

    let children = merged_children(tree, index);
    let count = children.len();
    for (i, (name, child, size)) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        output.push_str(&format!(
            "{}{}{}  [{}]\n",
            prefix,
            connector,
            name,
            format_size(size)
        ));
        if let Some(child_index) = child {
            let extension = if last { "    " } else { "│   " };
            let child_prefix = format!("{}{}", prefix, extension);
            format_dir_entry(tree, child_index, &child_prefix, output);
        }
    }
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a number with thousand separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, *c);
    }

    result
}
