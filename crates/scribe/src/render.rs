//! Markdown views of stored articles.
use chrono::Local;
use scribe_prompt::builder::PromptBuilder;
use scribe_store::ArticleRecord;

/// Characters of the key shown in listings.
pub const SHORT_KEY_LEN: usize = 10;

pub const EMPTY_HISTORY: &str = "No articles generated yet.";

pub const TOPIC_HINT: &str = "Type a topic and press Enter to start the article generation process.";

/// `## {title}`, a blank line, then the body.
pub fn render_article(record: &ArticleRecord) -> String {
    PromptBuilder::new()
        .add_section_h2(&record.title)
        .add_blank_line()
        .add_line(record.article.trim_end())
        .finalize()
}

/// Numbered newest-first listing.  `records` is expected in history order.
pub fn render_history(records: &[ArticleRecord], limit: Option<usize>) -> String {
    if records.is_empty() {
        return PromptBuilder::new().add_line(EMPTY_HISTORY).finalize();
    }

    let shown = limit.unwrap_or(records.len()).min(records.len());
    let mut builder = PromptBuilder::new().add_section_h1("History");

    for (i, record) in records.iter().take(shown).enumerate() {
        let created = record.created.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        builder = builder.add_numbered(
            i + 1,
            format_args!("{} ({}, {created})", record.title, record.short_key(SHORT_KEY_LEN)),
        );
    }

    if shown < records.len() {
        builder = builder.add_line(format_args!("… {} more", records.len() - shown));
    }

    builder.finalize()
}
