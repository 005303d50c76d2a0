use crate::domain::page::{PageBuilder, PageDocument};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::collections::BTreeMap;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose body is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Extracts a [`PageDocument`] from server-rendered HTML.
///
/// The reader runs in a lenient mode: unclosed and void elements are
/// tolerated, and a markup error ends extraction with whatever was read so
/// far rather than failing the whole page.
#[must_use]
pub fn parse_page(location: &str, html: &str) -> PageDocument {
    let html = strip_raw_text(html);
    let mut reader = Reader::from_str(&html);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.trim_text(true);
    }

    let mut builder = PageBuilder::new(location);
    let mut in_title = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = tag_name(&e);
                if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                    continue;
                }
                in_title = tag == "title";
                let void = VOID_ELEMENTS.contains(&tag.as_str());
                let id = builder.push_owned(tag, attributes(&e));
                if !void {
                    builder.enter(id);
                }
            }
            Ok(Event::Empty(e)) => {
                builder.push_owned(tag_name(&e), attributes(&e));
            }
            Ok(Event::End(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                    continue;
                }
                if tag == "title" {
                    in_title = false;
                }
                builder.close_tag(&tag);
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map(Cow::into_owned)
                    .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                if in_title {
                    builder.set_title(&text);
                }
                builder.text(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    location,
                    position = reader.buffer_position(),
                    error = %e,
                    "stopped reading page markup early"
                );
                break;
            }
        }
    }

    builder.finish()
}

/// Empties the bodies of `<script>` and `<style>` elements.
///
/// Their content is not markup, so a bare `<` inside would otherwise be read
/// as a tag and derail everything after it. An element left unclosed drops
/// the rest of the input.
fn strip_raw_text(html: &str) -> Cow<'_, str> {
    let lower = html.to_ascii_lowercase();
    let mut out = String::new();
    let mut copied = 0;
    let mut cursor = 0;

    while let Some((open, tag)) = next_raw_open(&lower, cursor) {
        let Some(gt) = lower[open..].find('>').map(|i| open + i) else {
            break;
        };
        if lower.as_bytes()[gt - 1] == b'/' {
            cursor = gt + 1;
            continue;
        }
        out.push_str(&html[copied..=gt]);
        let close = format!("</{tag}");
        match lower[gt + 1..].find(&close) {
            Some(i) => {
                copied = gt + 1 + i;
                cursor = copied + close.len();
            }
            None => {
                copied = html.len();
                cursor = html.len();
            }
        }
    }

    if copied == 0 {
        return Cow::Borrowed(html);
    }
    out.push_str(&html[copied..]);
    Cow::Owned(out)
}

fn next_raw_open(lower: &str, from: usize) -> Option<(usize, &'static str)> {
    let mut from = from;
    loop {
        let (open, tag) = RAW_TEXT_ELEMENTS
            .iter()
            .filter_map(|tag| {
                lower[from..]
                    .find(&format!("<{tag}"))
                    .map(|i| (from + i, *tag))
            })
            .min_by_key(|(open, _)| *open)?;
        let after = open + 1 + tag.len();
        match lower.as_bytes().get(after) {
            Some(b'>' | b'/') | None => return Some((open, tag)),
            Some(b) if b.is_ascii_whitespace() => return Some((open, tag)),
            Some(_) => from = after,
        }
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn attributes(e: &BytesStart<'_>) -> BTreeMap<String, String> {
    e.html_attributes()
        .filter_map(Result::ok)
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = attr
                .unescape_value()
                .map(Cow::into_owned)
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            (key, value)
        })
        .collect()
}
