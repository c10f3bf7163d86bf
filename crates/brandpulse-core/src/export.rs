//! CSV rendering of mention rows.

use std::fmt::Write as _;

use crate::mention::Mention;

/// Column order of exported files: the stored columns plus the derived date.
pub const CSV_COLUMNS: [&str; 10] = [
    "id",
    "brand",
    "text",
    "subreddit",
    "author",
    "created_utc",
    "sentiment_score",
    "sentiment_label",
    "url",
    "date",
];

/// Quote a field if it contains a comma, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render mentions as CSV with a header row, one line per mention.
#[must_use]
pub fn mentions_to_csv<'a>(mentions: impl IntoIterator<Item = &'a Mention>) -> String {
    let mut out = CSV_COLUMNS.join(",");
    out.push('\n');

    for m in mentions {
        let fields = [
            csv_field(&m.id),
            csv_field(&m.brand),
            csv_field(&m.text),
            csv_field(&m.subreddit),
            csv_field(&m.author),
            m.created_utc.format("%Y-%m-%d %H:%M:%S").to_string(),
            m.sentiment_score.to_string(),
            m.sentiment_label.to_string(),
            csv_field(&m.url),
            m.date().to_string(),
        ];
        let _ = writeln!(out, "{}", fields.join(","));
    }
    out
}
