use regex::Regex;
use std::sync::LazyLock;

static CONTAINER_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div\b[^>]*\bdata-lyrics-container\s*=\s*["']true["'][^>]*>"#)
        .expect("lyrics container regex should compile")
});
static CLASS_CONTAINER_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div\b[^>]*\bclass\s*=\s*["'](Lyrics__Container-[^"']*)["'][^>]*>"#)
        .expect("class container regex should compile")
});
static DIV_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)div\b[^>]*>").expect("div regex should compile")
});
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("line break regex should compile")
});
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag regex should compile"));
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run regex should compile"));

/// Pulls the lyrics text out of a song page: every
/// `data-lyrics-container="true"` block, or failing that every
/// `Lyrics__Container-*` block that is not a header. `<br>` becomes a
/// newline, tags are stripped and common entities decoded. `None` when the
/// page has no lyrics.
pub fn extract_lyrics(html: &str) -> Option<String> {
    let mut blocks = collect_blocks(html, CONTAINER_START.captures_iter(html));
    if blocks.is_empty() {
        let containers = CLASS_CONTAINER_START
            .captures_iter(html)
            .filter(|tag| !tag.get(1).is_some_and(|class| is_header_class(class.as_str())));
        blocks = collect_blocks(html, containers);
    }

    if blocks.is_empty() {
        return None;
    }

    let lyrics = blocks.join("\n");
    Some(BLANK_RUN.replace_all(&lyrics, "\n\n").trim().to_string())
}

fn collect_blocks<'h>(
    html: &'h str,
    opening_tags: impl Iterator<Item = regex::Captures<'h>>,
) -> Vec<String> {
    opening_tags
        .filter_map(|tag| tag.get(0))
        .filter_map(|start| container_body(html, start.end()))
        .map(block_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn is_header_class(classes: &str) -> bool {
    classes
        .split_whitespace()
        .any(|class| class.contains("LyricsHeader"))
}

/// Inner HTML from `body_start` up to the `</div>` balancing the opening tag.
fn container_body(html: &str, body_start: usize) -> Option<&str> {
    let mut depth = 1usize;

    for tag in DIV_TAG.captures_iter(&html[body_start..]) {
        let whole = tag.get(0)?;
        let closing = tag.get(1).is_some_and(|slash| !slash.as_str().is_empty());

        if closing {
            depth -= 1;
            if depth == 0 {
                return Some(&html[body_start..body_start + whole.start()]);
            }
        } else {
            depth += 1;
        }
    }

    None
}

fn block_text(body: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(body, "\n");
    let stripped = ANY_TAG.replace_all(&with_breaks, "");
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
