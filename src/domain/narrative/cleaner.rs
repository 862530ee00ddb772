//! Narrative cleaner: strips the structured block and prompt scaffolding.

use crate::domain::extraction::fenced_blocks;
use crate::domain::prompt::{category_marker, IMPORTANT_PREFIX, STRATEGY_MARKER};
use crate::domain::swot::SwotCategory;

/// One removal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningRule {
    /// Every complete ```json block.
    JsonBlocks,
    /// A line opening with `IMPORTANT:` that comes before the first section
    /// marker, up to that marker. Left alone when no marker follows.
    ImportantPreamble,
    /// Header lines naming the JSON/structured block or the JSON result.
    BlockHeaders,
    /// Bold spans naming the JSON or structured block, such as
    /// `**JSON BLOCK**` or `**THE BLOCK**`.
    BoldBlockSpans,
    /// The closing "Finally ... JSON" instruction line.
    ClosingInstruction,
}

impl CleaningRule {
    pub fn all() -> &'static [CleaningRule] {
        &[
            CleaningRule::JsonBlocks,
            CleaningRule::ImportantPreamble,
            CleaningRule::BlockHeaders,
            CleaningRule::BoldBlockSpans,
            CleaningRule::ClosingInstruction,
        ]
    }

    /// Applies the rule once.
    pub fn apply(&self, text: &str) -> String {
        match self {
            CleaningRule::JsonBlocks => remove_json_blocks(text),
            CleaningRule::ImportantPreamble => remove_important_preamble(text),
            CleaningRule::BlockHeaders => remove_lines(text, is_block_header),
            CleaningRule::BoldBlockSpans => remove_bold_block_spans(text),
            CleaningRule::ClosingInstruction => remove_lines(text, is_closing_instruction),
        }
    }
}

/// Cleans raw replies for display.
///
/// Rules are applied repeatedly until the text stops changing, so cleaning
/// is idempotent: `clean(clean(t)) == clean(t)`.
#[derive(Debug, Clone)]
pub struct NarrativeCleaner {
    rules: Vec<CleaningRule>,
}

impl Default for NarrativeCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrativeCleaner {
    pub fn new() -> Self {
        Self {
            rules: CleaningRule::all().to_vec(),
        }
    }

    pub fn with_rules(rules: Vec<CleaningRule>) -> Self {
        Self { rules }
    }

    pub fn clean(&self, raw: &str) -> String {
        let mut current = self.pass(raw);
        loop {
            let next = self.pass(&current);
            // Every rule only deletes text, so this terminates.
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        let cleaned = self
            .rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc));
        cleaned.trim().to_string()
    }
}

fn remove_json_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for block in fenced_blocks(text) {
        out.push_str(&text[last..block.start]);
        last = block.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Line content after indentation and markdown decoration.
fn line_body(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '#' | '*' | '>' | '-' | '_'))
}

/// Offset of the earliest SWOT category or strategy marker.
fn first_section_marker(text: &str) -> Option<usize> {
    SwotCategory::all()
        .iter()
        .map(|c| category_marker(*c))
        .chain(std::iter::once(STRATEGY_MARKER))
        .filter_map(|marker| text.find(marker))
        .min()
}

fn remove_important_preamble(text: &str) -> String {
    let Some(first_marker) = first_section_marker(text) else {
        return text.to_string();
    };

    let mut offset = 0;
    for line in text[..first_marker].split_inclusive('\n') {
        if line_body(line).starts_with(IMPORTANT_PREFIX) {
            return format!("{}{}", &text[..offset], &text[first_marker..]);
        }
        offset += line.len();
    }
    text.to_string()
}

fn remove_lines(text: &str, matches: fn(&str) -> bool) -> String {
    text.split_inclusive('\n')
        .filter(|line| !matches(line))
        .collect()
}

fn is_block_header(line: &str) -> bool {
    if !line.trim_start().starts_with('#') {
        return false;
    }
    let upper = line.to_uppercase();
    ["JSON BLOCK", "STRUCTURED BLOCK", "JSON RESULT"]
        .iter()
        .any(|needle| upper.contains(needle))
}

fn is_closing_instruction(line: &str) -> bool {
    let body = line_body(line).to_lowercase();
    body.starts_with("finally") && body.contains("json")
}

/// Words that may accompany BLOCK in a bare scaffolding span.
const SCAFFOLD_WORDS: &[&str] = &["BLOCK", "THE", "DATA", "RESULT", "OUTPUT", "FINAL", "BELOW"];

fn is_scaffold_span(span: &str) -> bool {
    let upper = span.to_uppercase();
    let words: Vec<&str> = upper
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if !words.contains(&"BLOCK") {
        return false;
    }
    words.iter().any(|w| matches!(*w, "JSON" | "STRUCTURED"))
        || words.iter().all(|w| SCAFFOLD_WORDS.contains(w))
}

fn remove_bold_block_spans(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let mut rest = line;
        while let Some(open) = rest.find("**") {
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("**") else {
                break;
            };
            let inner = &after_open[..close];
            if is_scaffold_span(inner) {
                out.push_str(&rest[..open]);
            } else {
                out.push_str(&rest[..open + 2 + close + 2]);
            }
            rest = &after_open[close + 2..];
        }
        out.push_str(rest);
    }
    out
}
