use std::pin::Pin;

use futures_core::stream::Stream;
use scribe_core::{
    error::{Result, ScribeError},
    provider::{ChatCompleteParameters, StreamingChatProvider},
};

use crate::{
    OpenAiAdapter,
    api_v1::FinishReason,
    error::OpenAiError,
    provider_impl_chat::build_chat_request,
};

impl StreamingChatProvider for OpenAiAdapter {
    type Delta<'s>
        = Pin<Box<dyn Stream<Item = Result<String>> + Send + 's>>
    where
        Self: 's;

    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's,
    {
        let client = &self.client;

        Box::pin(async_stream::try_stream! {
            use futures_util::StreamExt;

            let request = build_chat_request(params)?;

            let stream = client.chat_completion_stream(request);
            futures_util::pin_mut!(stream);

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(ScribeError::from)?;

                for choice in chunk.choices {
                    // Only the first choice is surfaced, matching the
                    // non-streaming path.
                    if choice.index != 0 {
                        continue;
                    }

                    if let Some(text) = choice.delta.content
                        && !text.is_empty()
                    {
                        yield text;
                    }

                    match choice.finish_reason {
                        Some(FinishReason::ContentFilter) => {
                            Err::<(), _>(ScribeError::from(OpenAiError::Format(
                                "completion was stopped by the content filter".into(),
                            )))?;
                        }
                        Some(_) => return,
                        None => {}
                    }
                }
            }
        })
    }
}
