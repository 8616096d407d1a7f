//! Landmark-based extraction of track metadata from a SoundCloud track page.
//!
//! The page is never parsed as a document. Each field is located by the
//! first occurrence of a fixed piece of markup, so a layout change upstream
//! empties the affected field instead of failing the whole record.

use std::sync::LazyLock;

use regex::Regex;

const ARTIST_LANDMARK: &str = "by <a href=";
const TITLE_LANDMARK: &str = r#"<h1 itemprop="name">"#;
const TAG_LANDMARK: &str = r#"<dd><a href="/tags/"#;
const DESCRIPTION_LANDMARK: &str = r#"<meta itemprop="description" content=""#;
const DESCRIPTION_END: &str = r#"" />"#;

/// Descriptions are cut to this many bytes.
pub const DESCRIPTION_LIMIT: usize = 500;

// Links, @handles, e-mail addresses and bare www. references
static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://\S+|@[a-zA-Z0-9_-]+|\b[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+|\bwww\.\S+",
    )
    .unwrap()
});

/// Metadata scraped from a single track page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub title: String,
    pub tags: String,
    pub description: String,
}

pub fn scrape_track(html: &str) -> Track {
    let mut description = sanitize(extract_description(html).unwrap_or_default());
    truncate_on_char_boundary(&mut description, DESCRIPTION_LIMIT);

    Track {
        artist: sanitize(extract_artist(html).unwrap_or_default()),
        title: sanitize(extract_title(html).unwrap_or_default()),
        tags: sanitize(extract_tag(html).unwrap_or_default()),
        description,
    }
}

pub fn extract_artist(html: &str) -> Option<&str> {
    element_text_after(html, ARTIST_LANDMARK)
}

pub fn extract_title(html: &str) -> Option<&str> {
    element_text_after(html, TITLE_LANDMARK)
}

/// Only the first tag on the page is taken.
pub fn extract_tag(html: &str) -> Option<&str> {
    element_text_after(html, TAG_LANDMARK)
}

pub fn extract_description(html: &str) -> Option<&str> {
    let start = html.find(DESCRIPTION_LANDMARK)? + DESCRIPTION_LANDMARK.len();
    slice_until(html, start, DESCRIPTION_END)
}

/// Text between the first `>` following `landmark` and the next `<`.
fn element_text_after<'a>(html: &'a str, landmark: &str) -> Option<&'a str> {
    let start = html.find(landmark)? + landmark.len();
    let open = start + html.get(start..)?.find('>')? + 1;
    slice_until(html, open, "<")
}

/// `data[start..]` up to `end_marker`, or `None` if `start` is out of range
/// or the marker never appears.
fn slice_until<'a>(data: &'a str, start: usize, end_marker: &str) -> Option<&'a str> {
    let rest = data.get(start..)?;
    let end = rest.find(end_marker)?;
    Some(&rest[..end])
}

/// Clean a raw field scraped out of the page.
pub fn sanitize(raw: &str) -> String {
    // Fields lifted out of embedded JSON carry `&#39;` style escapes
    let input = raw.replace("\\u0026", "&");
    let unescaped = html_escape::decode_html_entities(&input);
    let stripped = STRIP_RE.replace_all(&unescaped, "");
    let flattened = stripped.replace("\\n", " ");

    // Landmark matched inside the wrong element
    if flattened.starts_with("d>") {
        return String::new();
    }
    flattened
}

fn truncate_on_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
