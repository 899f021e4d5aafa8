//! Fragment grammar for fields that are not cleanly nested in the DOM.
//!
//! Several fields of the board markup are embedded as sibling text inside a
//! single element (author and date most of all), so they cannot be reached
//! with a selector alone. The routines here recover them from raw markup
//! fragments with regexes and splits on known separator tokens, and are
//! deliberately independent of the surrounding document parsers.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

/// Author inside a thread-detail byline: `<b><span>Author</span></b>`.
static SPAN_AUTHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<b>\s*<span[^>]*>\s*([^<]+)\s*</span>\s*</b>").expect("Invalid regex")
});

/// Date trailing a thread-detail byline: the text after the last ` - `.
static SPAN_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" - ([^<]+)$").expect("Invalid regex"));

/// Author/date line in search results: `von: {author} , {date}`.
static SEARCH_BYLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"von: (.*) , (.*)").expect("Invalid regex"));

/// Trim and collapse all internal whitespace runs to single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive a message ID from an anchor name like `p87331` by dropping the
/// single-character prefix.
pub fn message_id_from_anchor(name: &str) -> String {
    name.replacen('p', "", 1)
}

/// Recover a thread ID from an inline handler like `ld(1627,87331)`.
///
/// The second number is a reply anchor, not part of the thread ID; only the
/// portion before the first comma survives.
pub fn thread_id_from_onclick(onclick: &str) -> String {
    let s = onclick.strip_prefix("ld(").unwrap_or(onclick);
    let s = s.strip_suffix(",0)").unwrap_or(s);
    let s = s.split(',').next().unwrap_or(s);
    s.trim_end_matches(')').to_string()
}

/// Author from the raw inner HTML of a thread-detail byline span.
pub fn author_from_span_html(html: &str) -> Option<String> {
    SPAN_AUTHOR_RE
        .captures(html)
        .map(|c| clean_text(&decode_html_entities(&c[1])))
}

/// Date from the raw inner HTML of a thread-detail byline span: the plain
/// text after the last ` - ` separator.
pub fn date_from_span_html(html: &str) -> Option<String> {
    SPAN_DATE_RE
        .captures(html.trim())
        .map(|c| clean_text(&decode_html_entities(&c[1])))
}

/// Split a message-detail byline of the shape `von {author} am {date} um
/// {time}` into author and date. Unmatched parts come back empty, never as
/// an error.
pub fn split_byline(text: &str) -> (String, String) {
    if !text.contains("von ") {
        return (String::new(), String::new());
    }

    let mut parts = text.splitn(2, " am ");

    let author = parts
        .next()
        .map(|a| {
            let a = a.trim_start();
            let a = a.strip_prefix("von ").unwrap_or(a);
            // Leftover bold markup occasionally survives as literal text.
            clean_text(&a.replace("<b>", "").replace("</b>", ""))
        })
        .unwrap_or_default();

    let date = parts
        .next()
        .and_then(|rest| rest.splitn(2, " um ").next())
        .map(clean_text)
        .unwrap_or_default();

    (author, date)
}

/// Date from a thread-list meta text like `- wiede am 12.03.24 14:02 (5
/// Antworten)`: the substring between the ` am ` token and the next `(`.
pub fn date_from_meta(meta: &str) -> Option<String> {
    let start = meta.find(" am ")? + " am ".len();
    let rest = &meta[start..];
    let end = rest.find('(')?;
    Some(clean_text(&rest[..end]))
}

/// Value of a single query parameter in an origin-relative link.
pub fn query_param(link: &str, key: &str) -> Option<String> {
    let (_, query) = link.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Decompose a search-result link into (board, thread, message) IDs.
pub fn ids_from_link(link: &str) -> Option<(String, String, String)> {
    let board_id = query_param(link, "brdid")?;
    let thread_id = query_param(link, "thrdid")?;
    let msg_id = message_id_from_anchor(&query_param(link, "msgid")?);
    Some((board_id, thread_id, msg_id))
}

/// Author/date pair from a search-result text segment.
pub fn search_byline(segment: &str) -> Option<(String, String)> {
    SEARCH_BYLINE_RE
        .captures(segment)
        .map(|c| (c[1].to_string(), c[2].to_string()))
}
