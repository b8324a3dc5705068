use scribe_core::{
    error::{Result, ScribeError},
    generic::{GenericCompletionResponse, GenericMessage},
    provider::{BoxFuture, ChatCompleteParameters, ChatCompletionProvider},
};

use crate::{
    OpenAiAdapter,
    api_v1::{ChatCompletionMessage, ChatCompletionRequest, FinishReason},
    error::OpenAiError,
    model_map::map_model,
};

impl ChatCompletionProvider for OpenAiAdapter {
    type Message = ChatCompletionMessage;

    fn chat_complete<'a, M>(
        &'a self,
        params: ChatCompleteParameters<M>,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<GenericMessage>>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'a,
    {
        Box::pin(async move {
            let request = build_chat_request(params)?;
            let response = self.client.chat_completion(request).await?;

            let Some(first_choice) = response.choices.into_iter().min_by_key(|c| c.index) else {
                return Err(OpenAiError::Format("response has no choices".into()).into());
            };

            check_finish_reason(first_choice.finish_reason)?;
            Ok(GenericCompletionResponse {
                content: first_choice.message.into(),
                usage: response.usage.map(Into::into),
            })
        })
    }
}

/// `stop`, `length` or no reason at all still carry usable content.
pub(crate) fn check_finish_reason(reason: Option<FinishReason>) -> Result<()> {
    match reason {
        None | Some(FinishReason::Stop) | Some(FinishReason::Length) => Ok(()),
        Some(FinishReason::ContentFilter) => Err(OpenAiError::Format(
            "completion was stopped by the content filter".into(),
        )
        .into()),
        Some(other) => Err(OpenAiError::Format(format!(
            "unhandled finish reason on API: {other:?}"
        ))
        .into()),
    }
}

pub(crate) fn build_chat_request<M>(params: ChatCompleteParameters<M>) -> Result<ChatCompletionRequest>
where
    M: Into<ChatCompletionMessage>,
{
    let model = map_model(&params.model).ok_or_else(|| ScribeError::ModelNotSupported {
        provider: "openai",
        model: params.model.to_string(),
    })?;

    if params.messages.is_empty() {
        return Err(ScribeError::InvalidRequest(
            "chat completion needs at least one message".into(),
        ));
    }

    let messages = params.messages.into_iter().map(Into::into).collect();

    let mut request = ChatCompletionRequest::new(model.into_owned(), messages);
    request.temperature = params.temperature;
    request.max_tokens = params.max_tokens;

    Ok(request)
}
