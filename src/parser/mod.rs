//! Document parsers for the four page kinds of the board.
//!
//! Each parser takes a fetched body and builds one typed object by composing
//! selectors with the [`fragment`] extractors. The shared policy is
//! best-effort: a row missing a required field (an empty title, an
//! unparseable ID) is skipped, not an error. The one exception is the search
//! parser, where an undecodable result link fails the whole call.

pub mod fragment;

use scraper::{ElementRef, Html, Selector};

use crate::app::{ForumError, Result};
use crate::domain::{Board, Message, Thread};
use crate::parser::fragment::{
    author_from_span_html, clean_text, date_from_meta, date_from_span_html, ids_from_link,
    message_id_from_anchor, query_param, search_byline, split_byline, thread_id_from_onclick,
};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("BUG: illegal selector")
}

/// Count of enclosing nested-list elements, i.e. the reply depth.
fn hierarchy_depth(el: ElementRef) -> usize {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|a| a.value().name() == "ul")
        .count()
}

/// Parse the board list (origin page) into board summaries.
///
/// The marker class sits on the anchor itself or on an enclosing cell,
/// depending on the view; boards without a `brdid` in their link are
/// silently dropped.
pub fn parse_board_list(html: &str) -> Vec<Board> {
    let doc = Html::parse_document(html);
    let anchors = selector("a.brdlstname, .brdlstname a");

    let mut boards = Vec::new();
    for anchor in doc.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(id) = query_param(href, "brdid") else {
            continue;
        };
        let title = clean_text(&anchor.text().collect::<String>());
        boards.push(Board::summary(id, title));
    }
    boards
}

/// Parse a thread-list page into a populated [`Board`].
pub fn parse_thread_list(html: &str, board_id: &str) -> Board {
    let doc = Html::parse_document(html);
    let articles = selector("main.threadlist > article");
    let title_anchor = selector("a.threadtitle");
    let meta_span = selector("span.threadmeta");
    let meta_author = selector("strong");
    let board_title = selector(".navitemboard.active");

    let mut board = Board {
        id: board_id.to_string(),
        title: doc
            .select(&board_title)
            .next()
            .map(|t| clean_text(&t.text().collect::<String>()))
            .unwrap_or_default(),
        threads: Vec::new(),
    };

    for article in doc.select(&articles) {
        let Some(anchor) = article.select(&title_anchor).next() else {
            continue;
        };
        let title = clean_text(&anchor.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        let mut thread = Thread {
            title,
            link: anchor.value().attr("href").unwrap_or_default().to_string(),
            id: thread_id_from_onclick(anchor.value().attr("onclick").unwrap_or_default()),
            board_id: board_id.to_string(),
            ..Default::default()
        };

        if let Some(meta) = article.select(&meta_span).next() {
            thread.author = meta
                .select(&meta_author)
                .next()
                .map(|a| clean_text(&a.text().collect::<String>()))
                .unwrap_or_default();
            thread.date = date_from_meta(&meta.text().collect::<String>()).unwrap_or_default();
        }

        board.threads.push(thread);
    }

    board
}

/// Parse a thread-detail page into a [`Thread`] with its ordered messages.
///
/// Read flags are left false here; the session applies them from the read
/// log so this stays a pure function over the markup.
pub fn parse_thread(html: &str, board_id: &str, thread_id: &str) -> Thread {
    let doc = Html::parse_document(html);
    let items = selector("li");
    let topic_span = selector("a > span");
    let anchor_sel = selector("a");
    let span_sel = selector("span");

    let mut thread = Thread {
        id: thread_id.to_string(),
        board_id: board_id.to_string(),
        ..Default::default()
    };

    for item in doc.select(&items) {
        let topic = item
            .select(&topic_span)
            .next()
            .map(|s| clean_text(&s.text().collect::<String>()))
            .unwrap_or_default();
        if topic.is_empty() {
            continue;
        }

        let mut message = Message {
            topic,
            hierarchy: hierarchy_depth(item),
            board_id: board_id.to_string(),
            thread_id: thread_id.to_string(),
            ..Default::default()
        };

        if let Some(anchor) = item.select(&anchor_sel).next() {
            message.link = anchor.value().attr("href").unwrap_or_default().to_string();
            message.id = message_id_from_anchor(anchor.value().attr("name").unwrap_or_default());
        }

        // Author and date are not separate nodes; they sit as sibling text
        // inside the byline span's raw markup.
        if let Some(span) = item.select(&span_sel).next() {
            let span_html = span.inner_html();
            message.author.name = author_from_span_html(&span_html).unwrap_or_default();
            message.date = date_from_span_html(&span_html).unwrap_or_default();
        }

        thread.messages.push(message);
    }

    thread
}

/// Parse a message-detail page. Only the body fields are filled; ID, link
/// and read flag belong to the session, which knows the resource path.
pub fn parse_message(html: &str) -> Message {
    let doc = Html::parse_document(html);
    let body = selector("article.messagebody");
    let subject = selector("header.messageheader > div.msgsubject");
    let from = selector("header.messageheader > div.msgfrom");

    let mut message = Message {
        content: doc
            .select(&body)
            .next()
            .map(|b| b.text().collect::<String>())
            .unwrap_or_default(),
        topic: doc
            .select(&subject)
            .next()
            .map(|s| clean_text(&s.text().collect::<String>()))
            .unwrap_or_default(),
        ..Default::default()
    };

    if let Some(from) = doc.select(&from).next() {
        let (author, date) = split_byline(&from.text().collect::<String>());
        message.author.name = author;
        message.date = date;
    }

    message
}

/// Parse a search-results page.
///
/// First pass: every anchor becomes a candidate, with board/thread/message
/// IDs decomposed from its link; an undecodable link fails the whole search.
/// Second pass: the raw body after the `Matches:` marker carries the author
/// and date lines, paired to candidates by position. A missing marker means
/// the candidates come back with empty authors and dates, not an error.
pub fn parse_search_results(html: &str) -> Result<Vec<Message>> {
    let doc = Html::parse_document(html);
    let anchors = selector("a");

    let mut messages = Vec::new();
    for anchor in doc.select(&anchors) {
        let link = anchor
            .value()
            .attr("href")
            .ok_or_else(|| ForumError::LinkDecode(anchor.html()))?
            .to_string();
        let (board_id, thread_id, msg_id) =
            ids_from_link(&link).ok_or_else(|| ForumError::LinkDecode(link.clone()))?;

        messages.push(Message {
            topic: clean_text(&anchor.text().collect::<String>()),
            link,
            id: msg_id,
            board_id,
            thread_id,
            ..Default::default()
        });
    }

    let parts: Vec<&str> = html.split("Matches:").collect();
    if parts.len() != 2 {
        return Ok(messages);
    }

    // Results start after the first line break marker.
    for (i, segment) in parts[1].split("<br>").skip(1).enumerate() {
        if let Some((author, date)) = search_byline(segment) {
            if let Some(message) = messages.get_mut(i) {
                message.author.name = author;
                message.date = date;
            }
        }
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD_LIST_SAMPLE: &str = r#"<html><body>
<a class="brdlstname" href="pxmboard.php?brdid=6">Smalltalk</a>
<a class="brdlstname" href="pxmboard.php?brdid=26">O/T</a>
<a class="brdlstname" href="pxmboard.php?mode=about">About</a>
</body></html>"#;

    const THREAD_LIST_SAMPLE: &str = r##"<html><body>
<nav><span class="navitemboard active">Smalltalk</span></nav>
<main class="threadlist">
  <article>
    <a class="threadtitle" href="pxmboard.php?mode=thread&amp;brdid=6&amp;thrdid=1627"
       onclick="ld(1627,87331)">GPU prices going up again</a>
    <span class="threadmeta">- <strong>wiede</strong> am 12.03.24 14:02 (5 Antworten)</span>
  </article>
  <article>
    <a class="threadtitle" href="pxmboard.php?mode=thread&amp;brdid=6&amp;thrdid=1700"
       onclick="ld(1700,0)">Weekend plans</a>
    <span class="threadmeta">- <strong>ossi_osram</strong> am 13.03.24 09:15 (0 Antworten)</span>
  </article>
  <article>
    <a class="threadtitle" href="#" onclick="ld(1800,0)">   </a>
  </article>
</main>
</body></html>"##;

    const THREAD_SAMPLE: &str = r#"<html><body>
<ul>
  <li>
    <span><a href="pxmboard.php?mode=message&amp;brdid=6&amp;msgid=87331" name="p87331"><span>GPU prices going up again</span></a> - <small><b><span>wiede</span></b></small> - 12.03.24 14:02</span>
    <ul>
      <li>
        <span><a href="pxmboard.php?mode=message&amp;brdid=6&amp;msgid=87332" name="p87332"><span>Re: GPU prices going up again</span></a> - <small><b><span>ossi_osram</span></b></small> - 12.03.24 15:10</span>
      </li>
      <li>
        <span><a href="pxmboard.php?mode=message&amp;brdid=6&amp;msgid=87333" name="p87333"><span>   </span></a> - <small><b><span>ghost</span></b></small> - 12.03.24 15:11</span>
      </li>
    </ul>
  </li>
</ul>
</body></html>"#;

    const MESSAGE_SAMPLE: &str = r#"<html><body>
<header class="messageheader">
  <div class="msgsubject">Re: Treffen in Hamburg</div>
  <div class="msgfrom">von ossi_osram am 12.03.24 um 14:02</div>
</header>
<article class="messagebody">ist jemand von hier dabei?</article>
</body></html>"#;

    #[test]
    fn test_board_list_extracts_id_and_title() {
        let boards = parse_board_list(
            r#"<a class="brdlstname" href="pxmboard.php?brdid=6">Smalltalk</a>"#,
        );
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].id, "6");
        assert_eq!(boards[0].title, "Smalltalk");
    }

    #[test]
    fn test_board_list_drops_rows_without_id() {
        let boards = parse_board_list(BOARD_LIST_SAMPLE);
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].id, "6");
        assert_eq!(boards[1].id, "26");
        assert_eq!(boards[1].title, "O/T");
    }

    #[test]
    fn test_board_list_marker_class_on_ancestor() {
        let boards = parse_board_list(
            r#"<td class="brdlstname"><a href="pxmboard.php?brdid=4">Technik</a></td>"#,
        );
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].id, "4");
    }

    #[test]
    fn test_thread_list_ids_never_contain_comma() {
        let board = parse_thread_list(THREAD_LIST_SAMPLE, "6");
        assert!(!board.threads.is_empty());
        for thread in &board.threads {
            assert!(!thread.id.contains(','), "id was {:?}", thread.id);
        }
        assert_eq!(board.threads[0].id, "1627");
        assert_eq!(board.threads[1].id, "1700");
    }

    #[test]
    fn test_thread_list_meta_fields() {
        let board = parse_thread_list(THREAD_LIST_SAMPLE, "6");
        assert_eq!(board.title, "Smalltalk");
        assert_eq!(board.id, "6");
        assert_eq!(board.threads[0].author, "wiede");
        assert_eq!(board.threads[0].date, "12.03.24 14:02");
        assert_eq!(board.threads[0].title, "GPU prices going up again");
    }

    #[test]
    fn test_thread_list_skips_empty_titles() {
        let board = parse_thread_list(THREAD_LIST_SAMPLE, "6");
        assert_eq!(board.threads.len(), 2);
    }

    #[test]
    fn test_thread_skips_empty_topic_keeps_sibling() {
        let thread = parse_thread(THREAD_SAMPLE, "6", "1627");
        assert_eq!(thread.messages.len(), 2);
        assert_eq!(thread.messages[0].id, "87331");
        assert_eq!(thread.messages[1].id, "87332");
    }

    #[test]
    fn test_thread_message_fields() {
        let thread = parse_thread(THREAD_SAMPLE, "6", "1627");
        let first = &thread.messages[0];
        assert_eq!(first.topic, "GPU prices going up again");
        assert_eq!(first.author.name, "wiede");
        assert_eq!(first.date, "12.03.24 14:02");
        assert_eq!(first.link, "pxmboard.php?mode=message&brdid=6&msgid=87331");
        assert_eq!(first.thread_id, "1627");
        assert_eq!(first.board_id, "6");
        assert!(!first.read);
    }

    #[test]
    fn test_thread_hierarchy_counts_list_nesting() {
        let thread = parse_thread(THREAD_SAMPLE, "6", "1627");
        assert_eq!(thread.messages[0].hierarchy, 1);
        assert_eq!(thread.messages[1].hierarchy, 2);
    }

    #[test]
    fn test_message_roundtrip() {
        let message = parse_message(MESSAGE_SAMPLE);
        assert_eq!(message.author.name, "ossi_osram");
        assert_eq!(message.date, "12.03.24");
        assert_eq!(message.topic, "Re: Treffen in Hamburg");
        assert!(message.content.contains("ist jemand von hier"));
    }

    #[test]
    fn test_message_without_byline_marker() {
        let html = r#"<header class="messageheader">
          <div class="msgsubject">Orphan</div>
          <div class="msgfrom">anonymous 12.03.24</div>
        </header>
        <article class="messagebody">body</article>"#;
        let message = parse_message(html);
        assert_eq!(message.author.name, "");
        assert_eq!(message.date, "");
        assert_eq!(message.topic, "Orphan");
    }

    #[test]
    fn test_search_without_marker_returns_candidates() {
        let html = r#"<html><body>
<a href="pxmboard.php?mode=message&amp;brdid=6&amp;thrdid=1627&amp;msgid=87331">GPU prices</a>
<a href="pxmboard.php?mode=message&amp;brdid=26&amp;thrdid=900&amp;msgid=50000">Off topic hit</a>
</body></html>"#;
        let messages = parse_search_results(html).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].board_id, "6");
        assert_eq!(messages[0].thread_id, "1627");
        assert_eq!(messages[0].id, "87331");
        assert_eq!(messages[0].topic, "GPU prices");
        for m in &messages {
            assert_eq!(m.author.name, "");
            assert_eq!(m.date, "");
        }
    }

    #[test]
    fn test_search_backfills_author_and_date_by_position() {
        let html = "<html><body>\
<a href=\"pxmboard.php?mode=message&amp;brdid=6&amp;thrdid=1627&amp;msgid=87331\">GPU prices</a>\
<a href=\"pxmboard.php?mode=message&amp;brdid=26&amp;thrdid=900&amp;msgid=50000\">Off topic hit</a>\
Matches: 2<br>von: wiede , 12.03.24<br>von: ossi_osram , 13.03.24<br>\
</body></html>";
        let messages = parse_search_results(html).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author.name, "wiede");
        assert_eq!(messages[0].date, "12.03.24");
        assert_eq!(messages[1].author.name, "ossi_osram");
        assert_eq!(messages[1].date, "13.03.24");
    }

    #[test]
    fn test_search_undecodable_link_is_fatal() {
        let html = r#"<a href="pxmboard.php?mode=board&amp;brdid=6">nav</a>"#;
        let err = parse_search_results(html).unwrap_err();
        assert!(matches!(err, ForumError::LinkDecode(_)));
    }

    #[test]
    fn test_search_extra_byline_segments_are_ignored() {
        let html = "<html><body>\
<a href=\"pxmboard.php?mode=message&amp;brdid=6&amp;thrdid=1627&amp;msgid=87331\">Only hit</a>\
Matches: 1<br>von: wiede , 12.03.24<br>von: stray , 01.01.24\
</body></html>";
        let messages = parse_search_results(html).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].author.name, "wiede");
    }
}
