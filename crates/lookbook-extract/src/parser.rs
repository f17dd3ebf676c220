/// Parser for lookbook page text.
///
/// The visible text has a repeating structure: each profile starts at a
/// `Full Name` label line, followed by label lines and value lines in
/// document order. The parser splits the text into sections anchored at
/// `Full Name` occurrences, then walks each section line by line: a line
/// exactly matching a known field label starts a new field, and every
/// following non-label line is appended to that field's value until the
/// next label or the end of the section.
///
/// Malformed input never errors; sections that yield no fields are
/// silently dropped.
use regex::Regex;

use crate::model::{MentorRecord, FIELD_LABELS};

/// Parse page text into mentor records, in document order.
pub fn parse_mentor_text(text: &str) -> Vec<MentorRecord> {
    let mut mentors = Vec::new();

    for section in split_sections(text) {
        let lines: Vec<&str> = section
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut record = MentorRecord::default();
        let mut current_label: Option<&str> = None;
        let mut current_value: Vec<&str> = Vec::new();

        for line in lines {
            if let Some(label) = FIELD_LABELS.iter().copied().find(|&l| l == line) {
                flush_field(&mut record, current_label.take(), &mut current_value);
                current_label = Some(label);
            } else if current_label.is_some() {
                current_value.push(line);
            }
        }
        flush_field(&mut record, current_label.take(), &mut current_value);

        if !record.is_empty() {
            mentors.push(record);
        }
    }

    mentors
}

/// A field is recorded only when it accumulated at least one value line.
fn flush_field(record: &mut MentorRecord, label: Option<&str>, value: &mut Vec<&str>) {
    if let Some(label) = label {
        if !value.is_empty() {
            record.set(label, value.join(" ").trim().to_string());
        }
    }
    value.clear();
}

/// Split the text into sections, each starting at a `Full Name` label.
/// Text before the first anchor is discarded.
fn split_sections(text: &str) -> Vec<&str> {
    let anchor = Regex::new(r"Full Name\s*\n").expect("valid regex");

    let starts: Vec<usize> = anchor.find_iter(text).map(|m| m.start()).collect();
    if starts.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        sections.push(&text[start..end]);
    }
    sections
}

/// Count `Full Name` anchors that are actually followed by a value line,
/// the quick sanity signal reported before parsing.
pub fn count_anchors(text: &str) -> usize {
    let re = Regex::new(r"Full Name\s*\n\s*[^\n]+").expect("valid regex");
    re.find_iter(text).count()
}
