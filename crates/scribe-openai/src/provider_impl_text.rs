use scribe_core::{
    error::{Result, ScribeError},
    generic::GenericCompletionResponse,
    provider::{BoxFuture, TextCompleteParameters, TextCompletionProvider},
};

use crate::{OpenAiAdapter, api_v1::CompletionRequest, error::OpenAiError, model_map::map_model};

impl TextCompletionProvider for OpenAiAdapter {
    fn text_complete<'a>(
        &'a self,
        params: TextCompleteParameters,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<Vec<String>>>> {
        Box::pin(async move {
            let model = map_model(&params.model).ok_or_else(|| ScribeError::ModelNotSupported {
                provider: "openai",
                model: params.model.to_string(),
            })?;

            let mut request = CompletionRequest::new(model.into_owned(), params.prompt);
            request.temperature = params.temperature;
            request.max_tokens = params.max_tokens;

            let response = self.client.completion(request).await?;

            let mut choices = response.choices;
            if choices.is_empty() {
                return Err(OpenAiError::Format("response has no choices".into()).into());
            }
            choices.sort_by_key(|choice| choice.index);

            // The completions endpoint prefixes its output with the newlines
            // that would follow the prompt.
            let candidates = choices
                .into_iter()
                .map(|choice| choice.text.trim_start().to_owned())
                .collect();

            Ok(GenericCompletionResponse {
                content: candidates,
                usage: response.usage.map(Into::into),
            })
        })
    }
}
