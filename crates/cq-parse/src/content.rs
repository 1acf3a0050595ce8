//! Markup stripping and line splitting.
//!
//! Journal content arrives as the host's rich text. Folding only cares
//! about lines, so this module flattens markup: block-level boundaries
//! become newlines, inline markup disappears, a handful of common
//! entities are decoded. An unterminated tag is kept as literal text.

/// Tags whose boundary ends a line of prose, opening or closing form.
fn breaks_line(name: &str) -> bool {
    let base = name.strip_prefix('/').unwrap_or(name);
    matches!(
        base,
        "br" | "hr"
            | "p"
            | "div"
            | "li"
            | "ul"
            | "ol"
            | "tr"
            | "table"
            | "blockquote"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

/// First token of a tag body, lowercased, with any self-closing slash
/// removed: `"P class=\"x\""` becomes `"p"`, `"br/"` becomes `"br"`.
fn tag_name(body: &str) -> String {
    let token = body.split_whitespace().next().unwrap_or("");
    token.trim_end_matches('/').to_lowercase()
}

/// Replace markup with line structure and decode common entities.
fn strip_markup(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                let name = tag_name(&after[..close]);
                if breaks_line(&name) {
                    text.push('\n');
                }
                rest = &after[close + 1..];
            }
            None => {
                // Broken markup, keep it verbatim.
                text.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    // `&amp;` decodes last so freshly produced ampersands cannot start a
    // second round of decoding.
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Flatten journal content into trimmed, non-empty lines.
pub fn plain_lines(content: &str) -> Vec<String> {
    strip_markup(content)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let lines = plain_lines("<p>@descriptor</p><p>@might 12 1</p>");
        assert_eq!(lines, vec!["@descriptor", "@might 12 1"]);
    }

    #[test]
    fn inline_markup_disappears_without_splitting_the_line() {
        let lines = plain_lines("<p>@skill @[<b>sk01</b>] @level <em>trained</em></p>");
        assert_eq!(lines, vec!["@skill @[sk01] @level trained"]);
    }

    #[test]
    fn breaks_and_list_items_split_lines() {
        let lines = plain_lines("@focus<br>@speed +2<div>@effort 2</div>");
        assert_eq!(lines, vec!["@focus", "@speed +2", "@effort 2"]);
        let list = plain_lines("<ul><li>@item @[i1]</li><li>@item @[i2]</li></ul>");
        assert_eq!(list, vec!["@item @[i1]", "@item @[i2]"]);
    }

    #[test]
    fn an_opening_block_tag_ends_the_line_before_it() {
        let lines = plain_lines("Session notes<h2>@descriptor</h2>");
        assert_eq!(lines, vec!["Session notes", "@descriptor"]);
    }

    #[test]
    fn entities_decode_once() {
        let lines = plain_lines("<p>Jack &amp;&nbsp;Jill &#39;the&#39; &amp;lt;pair&amp;gt;</p>");
        assert_eq!(lines, vec!["Jack & Jill 'the' &lt;pair&gt;"]);
    }

    #[test]
    fn empty_and_whitespace_lines_are_dropped() {
        let lines = plain_lines("<p>@type</p><p> </p><p></p><p>@might 10</p>");
        assert_eq!(lines, vec!["@type", "@might 10"]);
    }

    #[test]
    fn broken_markup_is_kept_verbatim() {
        let lines = plain_lines("@descriptor<p oops");
        assert_eq!(lines, vec!["@descriptor<p oops"]);
    }
}
