use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// The substring that opens a tracked block, with or without a leading
/// `return` on the same line.
const SEND_OPEN: &str = "reply.send({";

/// Per-file scan state. Lives for exactly one forward pass; reset between
/// files by construction.
#[derive(Debug, Default)]
struct BraceScan {
    inside: bool,
    depth: i32,
}

/// Machine-readable result of one fix run.
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub base_directory: String,
    pub generated_at: DateTime<Utc>,
    pub examined: usize,
    pub changed: usize,
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub changed: bool,
    pub patched_lines: usize,
}

fn brace_delta(line: &str) -> i32 {
    let opens = line.matches('{').count() as i32;
    let closes = line.matches('}').count() as i32;
    opens - closes
}

/// Single forward pass over `source`, rewriting each `reply.send({` block
/// whose balanced closing line ends in `};` to end in `});` instead.
/// Returns the patched text and the number of lines rewritten.
///
/// Brace counting is purely textual: a `{` or `}` inside a string or
/// comment literal skews the depth. The route files this targets do not
/// contain such lines, so the scan does not try to account for them.
pub fn fix_source(source: &str) -> (String, usize) {
    let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();
    let mut scan = BraceScan::default();
    let mut patched = 0usize;

    for line in lines.iter_mut() {
        if !scan.inside {
            if line.contains(SEND_OPEN) {
                scan.inside = true;
                scan.depth = brace_delta(line);
                // A one-liner closes its own block; nothing left to track.
                if scan.depth <= 0 {
                    scan.inside = false;
                }
            }
            continue;
        }

        // A nested `reply.send({` here is counted by its braces only; the
        // depth counter is never re-armed mid-block.
        scan.depth += brace_delta(line);

        if scan.depth <= 0 {
            let trimmed = line.trim_end();
            // `});` already ends correctly; rewriting it again would stack
            // parens, so only a bare `};` ending qualifies.
            if !trimmed.ends_with("});") {
                if let Some(head) = trimmed.strip_suffix("};") {
                    *line = format!("{}}});", head);
                    patched += 1;
                }
            }
            scan.inside = false;
        }
    }

    (lines.join("\n"), patched)
}

/// Apply `fix_source` to the file at `path`, writing the patched text back
/// in place when anything changed. The write is a plain overwrite, not
/// atomic; a crash mid-write can corrupt the file.
pub fn fix_file(path: &Path) -> Result<FileOutcome> {
    let content = fs::read_to_string(path)?;
    let (patched, patched_lines) = fix_source(&content);

    let changed = patched_lines > 0;
    if changed {
        fs::write(path, patched)?;
    }

    Ok(FileOutcome {
        file: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string()),
        changed,
        patched_lines,
    })
}
