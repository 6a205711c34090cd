//! Splitting registry text into key/value blocks.
//!
//! The registry is a sequence of sections separated by blank lines. Every
//! non-blank line reads `<key padding>: <value>`.

use crate::error::ParseError;
use crate::schema::normalize_key;

/// One blank-line-delimited section of registry text.
///
/// Keys are normalized (whitespace removed) and unique; values are the raw
/// text after the first colon, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// 1-based line number of the first line of this block.
    line: usize,
    entries: Vec<(String, &'a str)>,
}

impl<'a> RawBlock<'a> {
    fn new(line: usize) -> Self {
        Self {
            line,
            entries: Vec::new(),
        }
    }

    /// Insert an entry. A repeated key replaces the earlier value in place.
    pub fn insert(&mut self, key: String, value: &'a str) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Raw value for a normalized key.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// Entries in the order they appeared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Line where the block starts.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Split registry text into ordered blocks.
///
/// Blank lines close the current block. Runs of blank lines, and blank
/// lines at either end, never produce empty blocks.
pub fn split_blocks(text: &str) -> Result<Vec<RawBlock<'_>>, ParseError> {
    let mut blocks = Vec::new();
    let mut current: Option<RawBlock<'_>> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| ParseError::MalformedLine {
            line: line_no,
            content: line.to_string(),
        })?;

        current
            .get_or_insert_with(|| RawBlock::new(line_no))
            .insert(normalize_key(key), value);
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    Ok(blocks)
}
