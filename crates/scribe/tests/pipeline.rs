mod common;

use std::time::Duration;

use common::{Reply, ScriptedBackend, generator, generator_with, read_only_generator};
use scribe::{
    error::GenerateError,
    generic::GenericRole,
    model::{Model, OpenAiModel},
    pipeline::{GenerationEvent, GenerationSettings, Selector},
    store::{ArticleStore, content_key},
};
use scribe_core::error::ScribeError;

#[tokio::test]
async fn generate_stores_title_and_article() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Text("\n\n\"Rust in Production\"\n"))
            .article(Reply::Text("Ownership makes it boring, in a good way.")),
    );

    let record = generator.generate("  rust  ").await.unwrap();

    assert_eq!(record.title, "Rust in Production");
    assert_eq!(record.article, "Ownership makes it boring, in a good way.");
    assert_eq!(record.key, content_key(&record.article));
    assert_eq!(generator.store().get(&record.key).unwrap(), Some(record.clone()));

    let backend = generator.client().backend();
    let text = backend.text_requests.lock().unwrap();
    assert_eq!(text.len(), 1);
    assert_eq!(text[0].prompt, "Give me a medium article title on rust");
    assert_eq!(text[0].model, Model::from(OpenAiModel::Gpt35TurboInstruct));
    assert_eq!(text[0].temperature, Some(0.9));
    assert_eq!(text[0].max_tokens, Some(256));

    let chat = backend.chat_requests.lock().unwrap();
    assert_eq!(chat.len(), 1);
    assert_eq!(chat[0].model, Model::from(OpenAiModel::Gpt35Turbo));
    assert_eq!(chat[0].messages.len(), 1);
    assert_eq!(chat[0].messages[0].role, GenericRole::User);
    assert_eq!(
        chat[0].messages[0].text(),
        "Write a medium article for the title Rust in Production."
    );
}

#[tokio::test]
async fn blank_topic_is_rejected_before_any_request() {
    let generator = generator(ScriptedBackend::new());

    let err = generator.generate(" \t ").await.unwrap_err();

    assert!(matches!(err, GenerateError::EmptyTopic));
    assert!(generator.client().backend().text_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_title_stops_the_pipeline() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Empty)
            .title(Reply::Text("   \n")),
    );

    for _ in 0..2 {
        let err = generator.generate("rust").await.unwrap_err();
        assert!(matches!(err, GenerateError::NoTitle));
        assert_eq!(err.to_string(), "Failed to generate a title for the article.");
    }

    assert!(generator.client().backend().chat_requests.lock().unwrap().is_empty());
    assert!(generator.store().is_empty().unwrap());
}

#[tokio::test]
async fn missing_article_is_not_persisted() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Text("A Title"))
            .article(Reply::Empty)
            .title(Reply::Text("A Title"))
            .article(Reply::Text("  \n ")),
    );

    for _ in 0..2 {
        let err = generator.generate("rust").await.unwrap_err();
        assert!(matches!(err, GenerateError::NoArticle));
        assert_eq!(
            err.to_string(),
            "Failed to generate the content of the article."
        );
    }

    assert!(generator.store().is_empty().unwrap());
}

#[tokio::test]
async fn request_failures_name_the_stage() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Fail("rate limited"))
            .title(Reply::Text("A Title"))
            .article(Reply::Fail("server exploded")),
    );

    let err = generator.generate("rust").await.unwrap_err();
    assert!(matches!(
        err,
        GenerateError::TitleRequest(ScribeError::Invalid(_))
    ));
    assert!(
        err.user_message()
            .starts_with("Failed to generate a title for the article.")
    );

    let err = generator.generate("rust").await.unwrap_err();
    assert!(matches!(err, GenerateError::ArticleRequest(_)));
    assert!(err.user_message().contains("server exploded"));

    assert!(generator.store().is_empty().unwrap());
}

#[tokio::test]
async fn settings_flow_into_both_requests() {
    let settings = GenerationSettings {
        title_model: Model::Custom("local-instruct".into()),
        title_temperature: None,
        title_max_tokens: Some(32),
        article_model: OpenAiModel::Gpt4oMini.into(),
        article_temperature: Some(0.2),
        article_max_tokens: Some(900),
        system_prompt: Some("You write for engineers.".into()),
    };
    let generator = generator_with(
        ScriptedBackend::new()
            .title(Reply::Text("Zero-Cost Abstractions"))
            .article(Reply::Text("They cost nothing.")),
        settings,
    );

    generator.generate("rust").await.unwrap();

    let backend = generator.client().backend();
    let text = backend.text_requests.lock().unwrap();
    assert_eq!(text[0].model, Model::Custom("local-instruct".into()));
    assert_eq!(text[0].temperature, None);
    assert_eq!(text[0].max_tokens, Some(32));

    let chat = backend.chat_requests.lock().unwrap();
    assert_eq!(chat[0].temperature, Some(0.2));
    assert_eq!(chat[0].max_tokens, Some(900));
    assert_eq!(chat[0].messages.len(), 2);
    assert_eq!(chat[0].messages[0].role, GenericRole::System);
    assert_eq!(chat[0].messages[0].text(), "You write for engineers.");
}

#[tokio::test]
async fn streaming_reports_title_then_deltas() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Text("Hello World"))
            .stream(vec![Ok("Hello".into()), Ok(", world".into()), Ok("!\n".into())]),
    );

    let mut events = Vec::new();
    let record = generator
        .generate_streaming("greetings", |event| {
            events.push(match event {
                GenerationEvent::Title(t) => format!("title:{t}"),
                GenerationEvent::Delta(d) => format!("delta:{d}"),
            })
        })
        .await
        .unwrap();

    assert_eq!(
        events,
        vec!["title:Hello World", "delta:Hello", "delta:, world", "delta:!\n"]
    );
    assert_eq!(record.article, "Hello, world!");
    assert_eq!(generator.store().len().unwrap(), 1);
}

#[tokio::test]
async fn broken_stream_is_not_persisted() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Text("Half Written"))
            .stream(vec![
                Ok("Once upon".into()),
                Err(ScribeError::Invalid("connection reset".into())),
            ]),
    );

    let err = generator
        .generate_streaming("stories", |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::ArticleRequest(_)));
    assert!(generator.store().is_empty().unwrap());
}

#[tokio::test]
async fn history_is_newest_first_and_selectable() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Text("First"))
            .article(Reply::Text("first body"))
            .title(Reply::Text("Second"))
            .article(Reply::Text("second body")),
    );

    let first = generator.generate("one").await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = generator.generate("two").await.unwrap();

    let history = generator.history().unwrap();
    let titles: Vec<&str> = history.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);

    assert_eq!(generator.show(&Selector::Index(1)).unwrap(), second);
    assert_eq!(generator.show(&Selector::Index(2)).unwrap(), first);
    assert_eq!(
        generator
            .show(&Selector::Key(first.short_key(12).to_uppercase()))
            .unwrap(),
        first
    );
    assert!(matches!(
        generator.show(&Selector::Index(3)),
        Err(GenerateError::NoSuchEntry(3))
    ));
    assert!(matches!(
        generator.show(&Selector::Index(0)),
        Err(GenerateError::NoSuchEntry(0))
    ));
}

#[tokio::test]
async fn identical_bodies_share_one_record() {
    let generator = generator(
        ScriptedBackend::new()
            .title(Reply::Text("Old Title"))
            .article(Reply::Text("same words"))
            .title(Reply::Text("New Title"))
            .article(Reply::Text("same words")),
    );

    let first = generator.generate("a").await.unwrap();
    let second = generator.generate("b").await.unwrap();

    assert_eq!(first.key, second.key);
    assert_eq!(generator.store().len().unwrap(), 1);
    assert_eq!(generator.history().unwrap()[0].title, "New Title");
}

#[tokio::test]
async fn failed_write_still_returns_the_article() {
    let generator = read_only_generator(
        ScriptedBackend::new()
            .title(Reply::Text("Crash-Safe Writes"))
            .article(Reply::Text("Fsync is not optional.")),
    );

    let err = generator.generate("durability").await.unwrap_err();

    let record = err.unsaved_record().expect("record carried on the error");
    assert_eq!(record.title, "Crash-Safe Writes");
    assert_eq!(record.article, "Fsync is not optional.");
    assert!(matches!(err, GenerateError::NotSaved { .. }));
    assert!(err.user_message().contains("disk full"));
}
