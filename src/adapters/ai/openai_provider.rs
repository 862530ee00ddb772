//! OpenAI Provider - Implementation of CompletionProvider for the chat
//! completions API, including compatible local servers reached through a
//! base URL override.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::endpoint::EndpointConfig;
use super::http::{build_client, check_status, send_error};
use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, TokenUsage,
};

/// Chat completions client. One prompt in, first choice out.
pub struct OpenAIProvider {
    config: EndpointConfig,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(config: EndpointConfig) -> Result<Self, CompletionError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn chat_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

fn finish_reason(raw: Option<&str>) -> FinishReason {
    match raw {
        None | Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Other,
    }
}

fn into_completion(body: ChatResponse) -> Result<CompletionResponse, CompletionError> {
    let Some(choice) = body.choices.into_iter().next() else {
        return Err(CompletionError::parse("No choices in response"));
    };
    let finish = finish_reason(choice.finish_reason.as_deref());

    let text = choice.message.content.unwrap_or_default();
    if text.is_empty() {
        return Err(if finish == FinishReason::ContentFilter {
            CompletionError::content_filtered("response blocked by content filter")
        } else {
            CompletionError::parse("Response has no content")
        });
    }

    let usage = body.usage.map_or_else(TokenUsage::default, |u| {
        TokenUsage::new(u.prompt_tokens, u.completion_tokens)
    });

    Ok(CompletionResponse::new(text, body.model)
        .with_finish_reason(finish)
        .with_usage(usage))
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        tracing::debug!(
            model = %self.config.model,
            trace_id = ?request.trace_id,
            prompt_chars = request.prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.chat_request(&request))
            .send()
            .await
            .map_err(|e| send_error(e, self.config.timeout))?;

        let body: ChatResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| CompletionError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(body)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", self.config.model.clone())
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAIProvider {
        OpenAIProvider::new(EndpointConfig::openai("test-key")).unwrap()
    }

    fn parse(json: &str) -> Result<CompletionResponse, CompletionError> {
        into_completion(serde_json::from_str(json).unwrap())
    }

    mod request {
        use super::*;

        #[test]
        fn prompt_goes_out_as_one_user_message() {
            let provider = provider();
            let request = CompletionRequest::new("Analyze Cafe X").with_temperature(0.3);
            let body = serde_json::to_value(provider.chat_request(&request)).unwrap();

            assert_eq!(body["model"], "gpt-4o-mini");
            assert_eq!(body["messages"].as_array().unwrap().len(), 1);
            assert_eq!(body["messages"][0]["role"], "user");
            assert_eq!(body["messages"][0]["content"], "Analyze Cafe X");
            assert!(body.get("max_tokens").is_none());
        }

        #[test]
        fn url_and_info_follow_endpoint() {
            let provider = OpenAIProvider::new(
                EndpointConfig::openai("k")
                    .with_model("llama3")
                    .with_base_url("http://localhost:11434/v1"),
            )
            .unwrap();

            assert_eq!(
                provider.completions_url(),
                "http://localhost:11434/v1/chat/completions"
            );
            assert_eq!(provider.provider_info(), ProviderInfo::new("openai", "llama3"));
        }
    }

    mod response {
        use super::*;

        #[test]
        fn takes_first_choice_with_usage() {
            let response = parse(
                r#"{
                    "model": "gpt-4o-mini-2024-07-18",
                    "choices": [
                        {"message": {"role": "assistant", "content": "First"}, "finish_reason": "length"},
                        {"message": {"role": "assistant", "content": "Second"}, "finish_reason": "stop"}
                    ],
                    "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
                }"#,
            )
            .unwrap();

            assert_eq!(response.content, "First");
            assert_eq!(response.model, "gpt-4o-mini-2024-07-18");
            assert_eq!(response.finish_reason, FinishReason::Length);
            assert_eq!(response.usage, TokenUsage::new(3, 1));
        }

        #[test]
        fn filtered_empty_reply_is_content_filtered() {
            let err = parse(
                r#"{"model": "m", "choices": [{"message": {"content": null}, "finish_reason": "content_filter"}]}"#,
            )
            .unwrap_err();
            assert!(matches!(err, CompletionError::ContentFiltered { .. }));
        }

        #[test]
        fn missing_choices_is_parse_error() {
            let err = parse(r#"{"model": "m"}"#).unwrap_err();
            assert!(matches!(err, CompletionError::Parse(_)));
        }

        #[test]
        fn unknown_finish_reason_is_other() {
            assert_eq!(finish_reason(Some("tool_calls")), FinishReason::Other);
            assert_eq!(finish_reason(None), FinishReason::Stop);
        }
    }
}
