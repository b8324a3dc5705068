//! Topic → title → article → history.
//!
//! [`ArticleGenerator`] sequences the two dependent model calls and writes the
//! result into an [`ArticleStore`].  It is generic over the backend so tests
//! can drive it with a scripted provider instead of the network.
use std::{fmt, pin::pin, str::FromStr};

use futures_util::StreamExt;
use scribe_core::{
    ScribeClient,
    generic::GenericMessage,
    model::{Model, OpenAiModel},
    provider::{ChatCompletionProvider, StreamingChatProvider, TextCompletionProvider},
};
use scribe_prompt::{ArticlePrompt, TitlePrompt};
use scribe_store::{ArticleRecord, ArticleStore};

use crate::error::{GenerateError, Result};

/// Model choice and sampling options for both stages.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub title_model: Model,
    pub title_temperature: Option<f64>,
    pub title_max_tokens: Option<u32>,
    pub article_model: Model,
    pub article_temperature: Option<f64>,
    pub article_max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            title_model: OpenAiModel::Gpt35TurboInstruct.into(),
            title_temperature: Some(0.9),
            title_max_tokens: Some(256),
            article_model: OpenAiModel::Gpt35Turbo.into(),
            article_temperature: Some(0.9),
            article_max_tokens: None,
            system_prompt: None,
        }
    }
}

/// Progress reported by [`ArticleGenerator::generate_streaming`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationEvent<'a> {
    /// The title is known; the article is about to be requested.
    Title(&'a str),
    /// A piece of article text.
    Delta(&'a str),
}

/// How the user points at a stored article.
///
/// Parses `#N` and bare numbers without a leading zero as history positions,
/// matching the numbers [`render_history`](crate::render::render_history)
/// prints.  Anything else is taken as a key or key prefix; keys that start
/// with `0` or contain a hex letter stay reachable that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based position in the newest-first history.
    Index(usize),
    /// Full key or unique key prefix.
    Key(String),
}

impl FromStr for Selector {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.strip_prefix('#') {
            Some(n) => n
                .parse()
                .map(Selector::Index)
                .map_err(|_| GenerateError::InvalidSelector(s.to_owned())),
            None => match s.parse::<usize>() {
                Ok(n) if !s.starts_with('0') => Ok(Selector::Index(n)),
                _ => Ok(Selector::Key(s.to_owned())),
            },
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(n) => write!(f, "#{n}"),
            Selector::Key(key) => f.write_str(key),
        }
    }
}

pub struct ArticleGenerator<B, S> {
    client: ScribeClient<B>,
    store: S,
    settings: GenerationSettings,
}

impl<B, S> ArticleGenerator<B, S> {
    pub fn new(backend: B, store: S, settings: GenerationSettings) -> Self {
        Self::with_client(ScribeClient::new(backend), store, settings)
    }

    pub fn with_client(client: ScribeClient<B>, store: S, settings: GenerationSettings) -> Self {
        Self {
            client,
            store,
            settings,
        }
    }

    pub fn client(&self) -> &ScribeClient<B> {
        &self.client
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn title_prompt(&self, topic: &str) -> TitlePrompt {
        let prompt = TitlePrompt::new(topic, self.settings.title_model.clone())
            .with_max_tokens(self.settings.title_max_tokens);

        match self.settings.title_temperature {
            Some(temperature) => prompt.with_temperature(temperature),
            None => prompt,
        }
    }

    fn article_prompt(&self, title: &str) -> ArticlePrompt {
        let prompt = ArticlePrompt::new(title, self.settings.article_model.clone())
            .with_max_tokens(self.settings.article_max_tokens)
            .with_system(self.settings.system_prompt.clone());

        match self.settings.article_temperature {
            Some(temperature) => prompt.with_temperature(temperature),
            None => prompt,
        }
    }
}

impl<B, S: ArticleStore> ArticleGenerator<B, S> {
    /// Every stored article, newest first.
    pub fn history(&self) -> Result<Vec<ArticleRecord>> {
        Ok(self.store.history()?)
    }

    /// Look up one stored article by history position or key.
    pub fn show(&self, selector: &Selector) -> Result<ArticleRecord> {
        select(&self.store, selector)
    }

    fn persist(&self, title: String, article: &str) -> Result<ArticleRecord> {
        let article = article.trim();
        if article.is_empty() {
            return Err(GenerateError::NoArticle);
        }

        let record = ArticleRecord::new(title, article);
        if let Err(source) = self.store.put(&record) {
            tracing::warn!(key = %record.short_key(12), error = %source, "article not stored");
            return Err(GenerateError::NotSaved {
                record: Box::new(record),
                source,
            });
        }
        tracing::info!(key = %record.short_key(12), title = %record.title, "article stored");

        Ok(record)
    }
}

impl<B: TextCompletionProvider, S> ArticleGenerator<B, S> {
    /// Ask the text-completion model for a title on `topic`.
    pub async fn generate_title(&self, topic: &str) -> Result<String> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerateError::EmptyTopic);
        }

        tracing::debug!(topic, model = %self.settings.title_model, "requesting title");
        let response = self
            .client
            .complete_prompt(self.title_prompt(topic))
            .await
            .map_err(GenerateError::TitleRequest)?;

        if let Some(usage) = response.usage {
            tracing::debug!(total_tokens = usage.total_tokens, "title usage");
        }

        response
            .content
            .first()
            .and_then(|candidate| clean_title(candidate))
            .ok_or(GenerateError::NoTitle)
    }
}

impl<B, S> ArticleGenerator<B, S>
where
    B: ChatCompletionProvider,
    GenericMessage: Into<B::Message>,
{
    /// Ask the chat model to write the article for `title`.
    pub async fn generate_article(&self, title: &str) -> Result<String> {
        tracing::debug!(title, model = %self.settings.article_model, "requesting article");
        let response = self
            .client
            .chat_prompt(self.article_prompt(title))
            .await
            .map_err(GenerateError::ArticleRequest)?;

        if let Some(usage) = response.usage {
            tracing::debug!(total_tokens = usage.total_tokens, "article usage");
        }

        response
            .content
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerateError::NoArticle)
    }
}

impl<B, S> ArticleGenerator<B, S>
where
    B: TextCompletionProvider + ChatCompletionProvider,
    GenericMessage: Into<B::Message>,
    S: ArticleStore,
{
    /// Title, then article, then persist.  Nothing is stored unless both
    /// stages succeed; a failed write returns [`GenerateError::NotSaved`]
    /// with the record attached.
    pub async fn generate(&self, topic: &str) -> Result<ArticleRecord> {
        let title = self.generate_title(topic).await?;
        let article = self.generate_article(&title).await?;
        self.persist(title, &article)
    }
}

impl<B, S> ArticleGenerator<B, S>
where
    B: TextCompletionProvider + StreamingChatProvider,
    GenericMessage: Into<B::Message>,
    S: ArticleStore,
{
    /// Like [`Self::generate`], but the article arrives as a stream.  The
    /// record is written once the stream has ended cleanly.
    pub async fn generate_streaming<F>(&self, topic: &str, mut on_event: F) -> Result<ArticleRecord>
    where
        F: FnMut(GenerationEvent<'_>),
    {
        let title = self.generate_title(topic).await?;
        on_event(GenerationEvent::Title(&title));

        tracing::debug!(title = %title, model = %self.settings.article_model, "streaming article");
        let mut deltas = pin!(self.client.stream_prompt(self.article_prompt(&title)));
        let mut article = String::new();

        while let Some(delta) = deltas.next().await {
            let delta = delta.map_err(GenerateError::ArticleRequest)?;
            on_event(GenerationEvent::Delta(&delta));
            article.push_str(&delta);
        }

        self.persist(title, &article)
    }
}

/// Resolve `selector` against `store` without needing a backend.
pub fn select<S: ArticleStore + ?Sized>(store: &S, selector: &Selector) -> Result<ArticleRecord> {
    match selector {
        Selector::Index(n) => {
            let history = store.history()?;
            n.checked_sub(1)
                .and_then(|i| history.into_iter().nth(i))
                .ok_or(GenerateError::NoSuchEntry(*n))
        }
        Selector::Key(key) => Ok(store.resolve(key)?),
    }
}

/// Trim a title candidate and drop one layer of surrounding quotes.
fn clean_title(raw: &str) -> Option<String> {
    const QUOTES: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('“', '”'), ('«', '»')];

    let mut title = raw.trim();
    for (open, close) in QUOTES {
        if let Some(inner) = title.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            title = inner.trim();
            break;
        }
    }

    (!title.is_empty()).then(|| title.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed_and_unquoted() {
        assert_eq!(clean_title("  Rust at Scale \n").as_deref(), Some("Rust at Scale"));
        assert_eq!(clean_title("\"Rust at Scale\"").as_deref(), Some("Rust at Scale"));
        assert_eq!(clean_title("“Rust at Scale”").as_deref(), Some("Rust at Scale"));
        assert_eq!(clean_title("'Don't Panic'").as_deref(), Some("Don't Panic"));
    }

    #[test]
    fn blank_or_bare_quote_titles_are_rejected() {
        assert_eq!(clean_title(""), None);
        assert_eq!(clean_title("   \n"), None);
        assert_eq!(clean_title("\"\""), None);
        assert_eq!(clean_title("“  ”"), None);
    }

    #[test]
    fn selectors_parse() {
        assert_eq!("#3".parse::<Selector>().unwrap(), Selector::Index(3));
        assert_eq!(
            " ba7816 ".parse::<Selector>().unwrap(),
            Selector::Key("ba7816".into())
        );
        assert!("#x".parse::<Selector>().is_err());
        assert_eq!("3".parse::<Selector>().unwrap(), Selector::Index(3));
        assert_eq!(
            "0123".parse::<Selector>().unwrap(),
            Selector::Key("0123".into())
        );
        assert_eq!(Selector::Index(2).to_string(), "#2");
    }
}
