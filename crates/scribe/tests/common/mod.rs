//! Scripted backend shared by the integration tests.
#![allow(dead_code)]

use std::{collections::VecDeque, io, sync::Mutex, vec};

use futures_util::stream;
use scribe::{
    generic::{GenericCompletionResponse, GenericMessage, GenericRole},
    pipeline::{ArticleGenerator, GenerationSettings},
    provider::{
        BoxFuture, ChatCompleteParameters, ChatCompletionProvider, StreamingChatProvider,
        TextCompleteParameters, TextCompletionProvider,
    },
    store::{ArticleRecord, ArticleStore, SledArticleStore, StoreError},
};
use scribe_core::error::{Result, ScribeError};

/// What the fake model answers with next.
pub enum Reply {
    Text(&'static str),
    Empty,
    Fail(&'static str),
}

#[derive(Default)]
pub struct ScriptedBackend {
    titles: Mutex<VecDeque<Reply>>,
    articles: Mutex<VecDeque<Reply>>,
    streams: Mutex<VecDeque<Vec<Result<String>>>>,
    pub text_requests: Mutex<Vec<TextCompleteParameters>>,
    pub chat_requests: Mutex<Vec<ChatCompleteParameters<GenericMessage>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(self, reply: Reply) -> Self {
        self.titles.lock().unwrap().push_back(reply);
        self
    }

    pub fn article(self, reply: Reply) -> Self {
        self.articles.lock().unwrap().push_back(reply);
        self
    }

    pub fn stream(self, deltas: Vec<Result<String>>) -> Self {
        self.streams.lock().unwrap().push_back(deltas);
        self
    }

    fn record_chat<M: Into<GenericMessage>>(&self, params: ChatCompleteParameters<M>) {
        let ChatCompleteParameters {
            messages,
            model,
            temperature,
            max_tokens,
        } = params;

        let mut recorded =
            ChatCompleteParameters::new(messages.into_iter().map(Into::into).collect(), model);
        recorded.temperature = temperature;
        recorded.max_tokens = max_tokens;
        self.chat_requests.lock().unwrap().push(recorded);
    }
}

impl TextCompletionProvider for ScriptedBackend {
    fn text_complete<'a>(
        &'a self,
        params: TextCompleteParameters,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<Vec<String>>>> {
        self.text_requests.lock().unwrap().push(params);
        let reply = self.titles.lock().unwrap().pop_front();

        Box::pin(async move {
            let content = match reply.expect("no title scripted") {
                Reply::Text(text) => vec![text.to_owned()],
                Reply::Empty => Vec::new(),
                Reply::Fail(message) => return Err(ScribeError::Invalid(message.into())),
            };

            Ok(GenericCompletionResponse {
                content,
                usage: None,
            })
        })
    }
}

impl ChatCompletionProvider for ScriptedBackend {
    type Message = GenericMessage;

    fn chat_complete<'a, M>(
        &'a self,
        params: ChatCompleteParameters<M>,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<GenericMessage>>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'a,
    {
        self.record_chat(params);
        let reply = self.articles.lock().unwrap().pop_front();

        Box::pin(async move {
            let content = match reply.expect("no article scripted") {
                Reply::Text(text) => Some(text.to_owned()),
                Reply::Empty => None,
                Reply::Fail(message) => return Err(ScribeError::Invalid(message.into())),
            };

            Ok(GenericCompletionResponse {
                content: GenericMessage {
                    content,
                    role: GenericRole::Assistant,
                    name: None,
                },
                usage: None,
            })
        })
    }
}

impl StreamingChatProvider for ScriptedBackend {
    type Delta<'s>
        = stream::Iter<vec::IntoIter<Result<String>>>
    where
        Self: 's;

    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's,
    {
        self.record_chat(params);
        let deltas = self
            .streams
            .lock()
            .unwrap()
            .pop_front()
            .expect("no stream scripted");

        stream::iter(deltas)
    }
}

pub fn generator(backend: ScriptedBackend) -> ArticleGenerator<ScriptedBackend, SledArticleStore> {
    generator_with(backend, GenerationSettings::default())
}

pub fn generator_with(
    backend: ScriptedBackend,
    settings: GenerationSettings,
) -> ArticleGenerator<ScriptedBackend, SledArticleStore> {
    let store = SledArticleStore::temporary().unwrap();
    ArticleGenerator::new(backend, store, settings)
}

/// A store that reads as empty and refuses every write.
pub struct ReadOnlyStore;

impl ArticleStore for ReadOnlyStore {
    fn put(&self, _record: &ArticleRecord) -> scribe::store::Result<()> {
        Err(StoreError::Sled(sled::Error::Io(io::Error::other("disk full"))))
    }

    fn get(&self, _key: &str) -> scribe::store::Result<Option<ArticleRecord>> {
        Ok(None)
    }

    fn fetch_all(&self) -> scribe::store::Result<Vec<ArticleRecord>> {
        Ok(Vec::new())
    }
}

pub fn read_only_generator(backend: ScriptedBackend) -> ArticleGenerator<ScriptedBackend, ReadOnlyStore> {
    ArticleGenerator::new(backend, ReadOnlyStore, GenerationSettings::default())
}
