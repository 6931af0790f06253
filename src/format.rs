use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| compile(r"\*\*(.*?)\*\*"));
static ITALIC: Lazy<Regex> = Lazy::new(|| compile(r"\*(.*?)\*"));
static CODE: Lazy<Regex> = Lazy::new(|| compile(r"`(.*?)`"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid format pattern {pattern}: {err}"))
}

/// Renders message text into the inline markup shown in a bubble.
///
/// The text is escaped first, so the only markup in the result is what the
/// substitutions below produce. They run in a fixed order, each over the
/// previous result: line breaks, `**bold**`, `*italic*`, then `` `code` ``.
pub fn format_message(text: &str) -> String {
    let escaped = escape_markup(text);
    let with_breaks = escaped.replace('\n', "<br>");
    let bold = BOLD.replace_all(&with_breaks, "<strong>$1</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>$1</em>");
    CODE.replace_all(&italic, "<code>$1</code>").into_owned()
}

pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
