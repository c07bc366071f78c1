//! Markdown-lite rendering of generated lesson plans.
//!
//! Deliberately not a markdown parser. Exactly three substitution passes run
//! in a fixed order, and the same function feeds both the on-screen view and
//! the exported document:
//!
//! 1. `**x**` → `<strong>x</strong>`
//! 2. `*x*` → `<em>x</em>`, never matching inside a span consumed by pass 1
//! 3. newline → `<br />`
//!
//! Matching is non-greedy and does not cross line breaks. Unpaired
//! delimiters stay literal and nothing is HTML-escaped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static BOLD_SLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap());

// Private-use delimiters marking where a bold span was lifted out. A
// `SLOT_OPEN` already present in the input is followed by `SLOT_ESCAPE` while
// the passes run, so it can never be mistaken for a slot.
const SLOT_OPEN: char = '\u{E000}';
const SLOT_CLOSE: char = '\u{E001}';
const SLOT_ESCAPE: char = '\u{E002}';

pub const LINE_BREAK: &str = "<br />";

/// Render generated text for display and export.
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape_slots(text);
    let (lifted, bold_spans) = lift_bold(&escaped);
    let s = apply_emphasis(&lifted);
    let s = restore_bold(&s, &bold_spans);
    let s = unescape_slots(&s);
    replace_newlines(&s)
}

fn escape_slots(text: &str) -> String {
    if !text.contains(SLOT_OPEN) {
        return text.to_string();
    }
    text.replace(SLOT_OPEN, &format!("{}{}", SLOT_OPEN, SLOT_ESCAPE))
}

fn unescape_slots(text: &str) -> String {
    if !text.contains(SLOT_OPEN) {
        return text.to_string();
    }
    text.replace(&format!("{}{}", SLOT_OPEN, SLOT_ESCAPE), &SLOT_OPEN.to_string())
}

// ── Pass 1: bold ────────────────────────────────────────────────────────────

/// Pulls every bold span out of the text, leaving a numbered slot behind, so
/// the emphasis pass cannot see the asterisks inside it.
fn lift_bold(text: &str) -> (String, Vec<String>) {
    let mut spans = Vec::new();
    let lifted = BOLD
        .replace_all(text, |caps: &Captures| {
            spans.push(caps[1].to_string());
            format!("{}{}{}", SLOT_OPEN, spans.len() - 1, SLOT_CLOSE)
        })
        .into_owned();
    (lifted, spans)
}

fn restore_bold(text: &str, spans: &[String]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    BOLD_SLOT
        .replace_all(text, |caps: &Captures| {
            let inner = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|idx| spans.get(idx));
            match inner {
                Some(inner) => format!("<strong>{}</strong>", inner),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

// ── Pass 2: emphasis ────────────────────────────────────────────────────────

fn apply_emphasis(text: &str) -> String {
    ITALIC.replace_all(text, "<em>$1</em>").into_owned()
}

// ── Pass 3: line breaks ─────────────────────────────────────────────────────

fn replace_newlines(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
}
