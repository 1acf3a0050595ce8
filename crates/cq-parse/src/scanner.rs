//! Sentinel scanning and per-line tag consumption.
//!
//! At most three things are consumed from one line: the type tag (the
//! leftmost sentinel token), one bracketed entity reference, and one
//! option qualifier with its value. Everything else on the line is prose
//! and stays untouched.

use cq_core::OptionTag;

/// The tags consumed from one journal body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTags<'a> {
    /// Identifier of the leftmost sentinel token, without the sentinel.
    pub type_ident: &'a str,
    /// Inner text of the first `[...]` group after the type tag. The
    /// group may carry its own sentinel (`@[id]`) or stand bare (`[id]`).
    pub entity_ref: Option<&'a str>,
    /// The first recognized option qualifier and its raw value. A
    /// qualifier with no following word counts as absent.
    pub option: Option<(OptionTag, &'a str)>,
}

/// Byte offsets of every sentinel on the line, leftmost first.
fn sentinel_offsets(line: &str, sentinel: char) -> Vec<usize> {
    line.char_indices()
        .filter(|(_, c)| *c == sentinel)
        .map(|(offset, _)| offset)
        .collect()
}

/// The whitespace-delimited token starting at `offset`.
fn token_at(line: &str, offset: usize) -> &str {
    line[offset..].split_whitespace().next().unwrap_or("")
}

/// The first whitespace-delimited word after the token at `offset`.
fn value_after<'a>(line: &'a str, offset: usize, token: &str) -> &'a str {
    line[offset + token.len()..]
        .split_whitespace()
        .next()
        .unwrap_or("")
}

/// The first `[...]` group in `text`, if one is closed.
fn bracket_group(text: &str) -> Option<&str> {
    let open = text.find('[')?;
    let inner = &text[open + 1..];
    let close = inner.find(']')?;
    Some(&inner[..close])
}

/// Scan one line for its tags. Returns `None` when the line carries no
/// sentinel at all.
pub fn scan_line(line: &str, sentinel: char) -> Option<LineTags<'_>> {
    let offsets = sentinel_offsets(line, sentinel);
    let first = *offsets.first()?;

    let type_token = token_at(line, first);
    let type_ident = type_token.strip_prefix(sentinel).unwrap_or(type_token);
    let after_type = first + type_token.len();

    let entity_ref = bracket_group(&line[after_type..]);

    let mut option = None;
    for &offset in &offsets[1..] {
        let token = token_at(line, offset);
        let ident = token.strip_prefix(sentinel).unwrap_or(token);
        let Some(tag) = OptionTag::parse(ident) else {
            continue;
        };
        let value = value_after(line, offset, token);
        if !value.is_empty() {
            option = Some((tag, value));
        }
        break;
    }

    Some(LineTags {
        type_ident,
        entity_ref,
        option,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_leftmost_tag_is_the_type() {
        let tags = scan_line("@skill @[sk01] @level trained", '@').unwrap();
        assert_eq!(tags.type_ident, "skill");
        assert_eq!(tags.entity_ref, Some("sk01"));
        assert_eq!(tags.option, Some((OptionTag::Level, "trained")));
    }

    #[test]
    fn bare_bracket_groups_are_accepted() {
        let tags = scan_line("@ability [artifacts.ab01] @tier 1", '@').unwrap();
        assert_eq!(tags.type_ident, "ability");
        assert_eq!(tags.entity_ref, Some("artifacts.ab01"));
        assert_eq!(tags.option, Some((OptionTag::Tier, "1")));
    }

    #[test]
    fn lines_without_sentinels_scan_to_nothing() {
        assert_eq!(scan_line("gains a rope and three spikes", '@'), None);
    }

    #[test]
    fn a_lone_type_tag_has_no_entity_or_option() {
        let tags = scan_line("@effort 2", '@').unwrap();
        assert_eq!(tags.type_ident, "effort");
        assert_eq!(tags.entity_ref, None);
        assert_eq!(tags.option, None);
    }

    #[test]
    fn a_qualifier_without_a_value_counts_as_absent() {
        let tags = scan_line("@item @[it02] @quantity", '@').unwrap();
        assert_eq!(tags.option, None);
    }

    #[test]
    fn unrecognized_tokens_between_tags_are_skipped() {
        let tags = scan_line("@item @[it02] @gm-note @quantity 2", '@').unwrap();
        assert_eq!(tags.entity_ref, Some("it02"));
        assert_eq!(tags.option, Some((OptionTag::Quantity, "2")));
    }

    #[test]
    fn only_the_first_recognized_qualifier_is_consumed() {
        let tags = scan_line("@skill @[sk01] @level trained @quantity 3", '@').unwrap();
        assert_eq!(tags.option, Some((OptionTag::Level, "trained")));
    }

    #[test]
    fn an_unterminated_bracket_group_is_ignored() {
        let tags = scan_line("@item @[it02 @quantity 2", '@').unwrap();
        assert_eq!(tags.entity_ref, None);
    }

    #[test]
    fn extra_whitespace_between_tags_is_tolerated() {
        let tags = scan_line("@item   @[it02]    @quantity   4", '@').unwrap();
        assert_eq!(tags.entity_ref, Some("it02"));
        assert_eq!(tags.option, Some((OptionTag::Quantity, "4")));
    }

    #[test]
    fn alternate_sentinels_are_respected() {
        let tags = scan_line("#skill #[sk01] #level trained", '#').unwrap();
        assert_eq!(tags.type_ident, "skill");
        assert_eq!(tags.option, Some((OptionTag::Level, "trained")));
    }
}
