//! Classification of scanned tags into sentence and body vocabularies.
//!
//! Position decides which vocabulary applies: the first line of a
//! document is classified against the sentence vocabulary, every later
//! line against the statistic vocabulary first and the item vocabulary
//! second. That ordering is what makes `additional` a sentence slot on
//! line one and a pool statistic everywhere else.

use cq_core::{ItemCategory, SentenceTag, StatTag};

/// A recognized body-line type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTag {
    /// The line adjusts a statistic.
    Stat(StatTag),
    /// The line grants an item.
    Item(ItemCategory),
}

/// Classify a document's first line. The first whitespace-delimited word
/// must be a sentinel-prefixed sentence tag; anything else marks the
/// whole document as not meant for creation.
pub fn classify_first_line(line: &str, sentinel: char) -> Option<SentenceTag> {
    let word = line.split_whitespace().next()?;
    let ident = word.strip_prefix(sentinel)?;
    SentenceTag::parse(ident)
}

/// Classify a body-line type tag identifier.
pub fn classify_body_tag(ident: &str) -> Option<BodyTag> {
    if let Some(stat) = StatTag::parse(ident) {
        return Some(BodyTag::Stat(stat));
    }
    ItemCategory::parse(ident).map(BodyTag::Item)
}
