//! Output comparison and diff generation
//!
//! Equality is exact byte equality: no line-ending or whitespace
//! normalization. Only when the buffers differ are they decoded and
//! diffed line by line, in the familiar `Differ` layout:
//!
//! ```text
//! - only in actual
//! + only in expected
//!   in both
//! ? intraline hints under a changed line
//! ```

use similar::{DiffTag, TextDiff};

/// Pairs of changed lines at least this similar get `?` hint lines
const INTRALINE_CUTOFF: f32 = 0.75;

/// Result of comparing actual against expected output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    /// Whether the buffers are byte-for-byte identical
    pub equal: bool,
    /// Annotated lines, each ending in `\n`; `None` when equal
    pub diff: Option<Vec<String>>,
}

impl ComparisonResult {
    fn same() -> Self {
        Self {
            equal: true,
            diff: None,
        }
    }

    fn differs(lines: Vec<String>) -> Self {
        Self {
            equal: false,
            diff: Some(lines),
        }
    }

    /// The diff as a single printable block
    pub fn report(&self) -> Option<String> {
        self.diff.as_ref().map(|lines| lines.concat())
    }
}

/// Compare captured stdout against the expected-output fixture
pub fn compare(actual: &[u8], expected: &[u8]) -> ComparisonResult {
    if actual == expected {
        return ComparisonResult::same();
    }

    match (std::str::from_utf8(actual), std::str::from_utf8(expected)) {
        (Ok(actual), Ok(expected)) => ComparisonResult::differs(line_diff(actual, expected)),
        _ => ComparisonResult::differs(vec![binary_summary(actual, expected)]),
    }
}

/// Line-level diff of `actual` against `expected`
///
/// Lines keep their terminators, so a missing final newline shows up as
/// a changed last line.
pub fn line_diff(actual: &str, expected: &str) -> Vec<String> {
    let diff = TextDiff::from_lines(actual, expected);
    let old = diff.old_slices();
    let new = diff.new_slices();

    let mut out = Vec::new();
    let mut removed: Vec<&str> = Vec::new();
    let mut added: Vec<&str> = Vec::new();

    for op in diff.ops() {
        match op.tag() {
            DiffTag::Equal => {
                flush_changes(&mut removed, &mut added, &mut out);
                for line in &old[op.old_range()] {
                    out.push(tagged(' ', line));
                }
            }
            _ => {
                removed.extend_from_slice(&old[op.old_range()]);
                added.extend_from_slice(&new[op.new_range()]);
            }
        }
    }
    flush_changes(&mut removed, &mut added, &mut out);

    out
}

/// Emit one block of changed lines and reset it
fn flush_changes(removed: &mut Vec<&str>, added: &mut Vec<&str>, out: &mut Vec<String>) {
    replace_block(removed, added, out);
    removed.clear();
    added.clear();
}

fn replace_block(a: &[&str], b: &[&str], out: &mut Vec<String>) {
    match (a.is_empty(), b.is_empty()) {
        (false, false) => fancy_replace(a, b, out),
        (false, true) => dump('-', a, out),
        (true, false) => dump('+', b, out),
        (true, true) => {}
    }
}

/// Anchor a changed block on its most similar line pair
///
/// The pair with the best character ratio (at least the cutoff) gets hint
/// lines, and the lines before and after it are laid out the same way.
/// With no such pair the whole block is printed as removals and additions.
fn fancy_replace(a: &[&str], b: &[&str], out: &mut Vec<String>) {
    let mut best: Option<(f32, usize, usize)> = None;
    let mut identical: Option<(usize, usize)> = None;

    for (j, bj) in b.iter().enumerate() {
        let blen = bj.chars().count();
        for (i, ai) in a.iter().enumerate() {
            if ai == bj {
                identical.get_or_insert((i, j));
                continue;
            }
            let floor = best.map_or(INTRALINE_CUTOFF, |(ratio, _, _)| ratio);
            if length_bound(ai.chars().count(), blen) < floor {
                continue;
            }
            let ratio = TextDiff::from_chars(*ai, *bj).ratio();
            if ratio >= floor && best.map_or(true, |(top, _, _)| ratio > top) {
                best = Some((ratio, i, j));
            }
        }
    }

    let (i, j, same) = match (best, identical) {
        (Some((_, i, j)), _) => (i, j, false),
        (None, Some((i, j))) => (i, j, true),
        (None, None) => return plain_replace(a, b, out),
    };

    replace_block(&a[..i], &b[..j], out);
    if same {
        out.push(tagged(' ', a[i]));
    } else {
        intraline(a[i], b[j], out);
    }
    replace_block(&a[i + 1..], &b[j + 1..], out);
}

/// Highest ratio two lines of these lengths could reach
fn length_bound(alen: usize, blen: usize) -> f32 {
    let total = alen + blen;
    if total == 0 {
        1.0
    } else {
        2.0 * alen.min(blen) as f32 / total as f32
    }
}

/// Unrelated lines: the shorter side goes first
fn plain_replace(a: &[&str], b: &[&str], out: &mut Vec<String>) {
    if b.len() < a.len() {
        dump('+', b, out);
        dump('-', a, out);
    } else {
        dump('-', a, out);
        dump('+', b, out);
    }
}

fn dump(marker: char, lines: &[&str], out: &mut Vec<String>) {
    out.extend(lines.iter().map(|line| tagged(marker, line)));
}

/// A changed line pair followed by its `?` hint lines
fn intraline(a: &str, b: &str, out: &mut Vec<String>) {
    let chars = TextDiff::from_chars(a, b);
    let mut atags = String::new();
    let mut btags = String::new();

    for op in chars.ops() {
        let (la, lb) = (op.old_range().len(), op.new_range().len());
        match op.tag() {
            DiffTag::Equal => {
                atags.push_str(&" ".repeat(la));
                btags.push_str(&" ".repeat(lb));
            }
            DiffTag::Delete => atags.push_str(&"-".repeat(la)),
            DiffTag::Insert => btags.push_str(&"+".repeat(lb)),
            DiffTag::Replace => {
                atags.push_str(&"^".repeat(la));
                btags.push_str(&"^".repeat(lb));
            }
        }
    }

    out.push(tagged('-', a));
    push_hint(a, &atags, out);
    out.push(tagged('+', b));
    push_hint(b, &btags, out);
}

fn push_hint(line: &str, tags: &str, out: &mut Vec<String>) {
    // Tabs under tabs keep the markers aligned with the line above
    let tags: String = line
        .chars()
        .zip(tags.chars())
        .map(|(c, tag)| if tag == ' ' && c.is_whitespace() { c } else { tag })
        .collect();
    let tags = tags.trim_end();
    if !tags.is_empty() {
        out.push(format!("? {tags}\n"));
    }
}

fn tagged(marker: char, line: &str) -> String {
    if line.ends_with('\n') {
        format!("{marker} {line}")
    } else {
        format!("{marker} {line}\n")
    }
}

fn binary_summary(actual: &[u8], expected: &[u8]) -> String {
    let first = actual
        .iter()
        .zip(expected)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| actual.len().min(expected.len()));
    format!(
        "binary output differs (actual {} bytes, expected {} bytes, first difference at byte {})\n",
        actual.len(),
        expected.len(),
        first
    )
}
