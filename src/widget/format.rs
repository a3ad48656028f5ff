//! Turns a plain bot reply into display markup.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- ").unwrap());

static WARNING_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(cancer|toxic|harmful|dangerous|avoid|banned)\b").unwrap()
});

static REASSURING_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(safe|safer|recommended|choose|certified)\b").unwrap()
});

pub const WARNING_STYLE: &str = "color: #e91e63;";
pub const REASSURING_STYLE: &str = "color: #6ab04c;";

/// Applies line-break, bullet and keyword emphasis markup to `text`.
///
/// The input is not escaped; whatever markup the upstream sends is kept.
/// Running the output through again can double-wrap emphasised words, so
/// apply it once per message.
pub fn format_bot_response(text: &str) -> String {
    let formatted = text
        .replace("\\\"", "\"")
        .replace("\n\n", "</p><p>")
        .replace('\n', "<br>");
    let formatted = LEADING_DASH.replace_all(&formatted, "• ");
    let mut formatted = formatted.replace("<br>- ", "<br>• ");

    if formatted.contains("</p><p>") {
        formatted = format!("<p>{}</p>", formatted);
    }

    let formatted = WARNING_TERMS.replace_all(
        &formatted,
        format!("<strong style=\"{}\">$1</strong>", WARNING_STYLE).as_str(),
    );
    REASSURING_TERMS
        .replace_all(
            &formatted,
            format!("<strong style=\"{}\">$1</strong>", REASSURING_STYLE).as_str(),
        )
        .into_owned()
}
