mod common;

use common::{Reply, ScriptedBackend, generator, read_only_generator};
use scribe::{
    pipeline::ArticleGenerator,
    render::{EMPTY_HISTORY, TOPIC_HINT},
    session::Session,
    store::ArticleStore,
};

async fn run_session<S: ArticleStore>(
    generator: &ArticleGenerator<ScriptedBackend, S>,
    input: &str,
) -> String {
    let mut out = Vec::new();
    Session::new(generator)
        .run(tokio::io::BufReader::new(input.as_bytes()), &mut out)
        .await
        .unwrap();

    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn starts_with_empty_history_and_hint() {
    let generator = generator(ScriptedBackend::new());

    let out = run_session(&generator, "\n/quit\n").await;

    assert!(out.starts_with(EMPTY_HISTORY));
    assert_eq!(out.matches(TOPIC_HINT).count(), 2);
}

#[tokio::test]
async fn topic_line_generates_and_renders() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Text("Borrowing Without Tears"))
            .article(Reply::Text("Lend it, get it back.")),
    );

    let out = run_session(&generator, "borrow checker\n/history\n/show 1\n").await;

    assert_eq!(out.matches("## Borrowing Without Tears\n\nLend it, get it back.\n").count(), 2);
    assert!(out.contains("1. Borrowing Without Tears ("));
    assert_eq!(generator.store().len().unwrap(), 1);
}

#[tokio::test]
async fn failures_are_reported_and_the_loop_continues() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Empty)
            .title(Reply::Text("Second Try"))
            .article(Reply::Text("It worked.")),
    );

    let out = run_session(&generator, "first\nsecond\n/quit\n").await;

    assert!(out.contains("Failed to generate a title for the article."));
    assert!(out.contains("## Second Try"));
}

#[tokio::test]
async fn show_reports_unknown_entries_and_commands() {
    let generator = generator(ScriptedBackend::new());

    let out = run_session(&generator, "/show 4\n/show\n/dance\n").await;

    assert!(out.contains("no article #4 in the history"));
    assert!(out.contains("Usage: /show <n|key>"));
    assert!(out.contains("Unknown command `/dance`"));
}

#[tokio::test]
async fn unsaved_article_is_still_printed() {
    let generator = read_only_generator(
        ScriptedBackend::new()
            .title(Reply::Text("Write-Ahead Logs"))
            .article(Reply::Text("Append first, apply later.")),
    );

    let out = run_session(&generator, "wal\n/quit\n").await;

    assert!(out.contains("## Write-Ahead Logs\n\nAppend first, apply later.\n"));
    assert!(out.contains("The article could not be saved to the history"));
}
