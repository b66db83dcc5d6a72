use serde::{Deserialize, Serialize};
use log::{debug, trace};
use crate::error::ServiceError;

// ===== Message Types =====

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub max_tokens: usize
  , pub temperature: f32
}

impl ChatRequest
{   /// Request carrying `prompt` as the only user message
    pub fn user_prompt(
      model: &str
    , prompt: String
    , max_tokens: usize
    , temperature: f32
    ) -> Self
    {   ChatRequest
        {   model: model.to_string()
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: prompt
              }
            ]
          , max_tokens
          , temperature
        }
    }
}

/// Only `choices` is decoded; everything else is read from the raw body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub message: Option<ResponseMessage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage
{   #[serde(default)]
    pub content: Option<String>
}

/// Decoded completion plus the body exactly as received
#[derive(Debug, Clone)]
pub struct ChatCompletion
{   pub response: ChatResponse
  , pub raw: serde_json::Value
}

impl ChatCompletion
{   /// Trimmed text of the first choice, if it has any
    pub fn first_content(&self) -> Option<String>
    {   self.response.choices
          .first()
          .and_then(|c| c.message.as_ref())
          .and_then(|m| m.content.as_deref())
          .map(str::trim)
          .filter(|text| !text.is_empty())
          .map(str::to_string)
    }

    pub fn model(&self) -> Option<serde_json::Value>
    {   self.raw.get("model").cloned()
    }

    pub fn usage(&self) -> Option<serde_json::Value>
    {   self.raw.get("usage").cloned()
    }

    pub fn created(&self) -> Option<serde_json::Value>
    {   self.raw.get("created").cloned()
    }
}

// ===== Transport =====

/// OpenAI-compatible chat-completion endpoint
#[derive(Debug, Clone)]
pub struct OpenAiChat
{   http_client: reqwest::Client
  , api_base: String
  , api_key: Option<String>
}

impl OpenAiChat
{   pub fn new(
      http_client: reqwest::Client
    , api_base: String
    , api_key: Option<String>
    ) -> Self
    {   debug!("Creating OpenAiChat for {}", api_base);
        OpenAiChat
        {   http_client
          , api_base
          , api_key
        }
    }

    pub fn endpoint(&self) -> String
    {   format!("{}/chat/completions", self.api_base)
    }

    /// Send one completion request and decode the reply
    pub async fn create(
      &self
    , request: &ChatRequest
    ) -> Result<ChatCompletion, ServiceError>
    {   debug!("Sending chat completion for: {}", request.model);
        trace!("Chat request: {:?}", request);

        let mut builder = self.http_client
          .post(self.endpoint())
          .json(request);
        if let Some(key) = &self.api_key
        {   builder = builder.bearer_auth(key);
        }

        let response = builder
          .send()
          .await
          .map_err(|e| {
            debug!("HTTP error: {}", e);
            ServiceError::transport(e.to_string())
          })?;

        let status = response.status();
        trace!("Chat response status: {}", status);

        let body = response.text().await.map_err(|e| {
          debug!("Failed to read response body: {}", e);
          ServiceError::transport(e.to_string())
        })?;

        if !status.is_success()
        {   return Err(error_from_body(status.as_u16(), &body));
        }

        let raw: serde_json::Value
          = serde_json::from_str(&body).map_err(|e| {
            debug!("Parse error: {}", e);
            ServiceError::transport(e.to_string())
          })?;
        let response: ChatResponse
          = serde_json::from_value(raw.clone()).map_err(|e| {
            debug!("Unexpected response shape: {}", e);
            ServiceError::transport(e.to_string())
          })?;

        debug!(
          "Received {} choice(s) from {:?}",
          response.choices.len(),
          raw.get("model")
        );
        Ok(ChatCompletion { response, raw })
    }
}

/// Build the error for a non-2xx reply.
///
/// The message follows `"{status} {error.message}"` when the body has an
/// OpenAI-style error object; the parsed body (or its text) is kept as
/// details.
fn error_from_body(status: u16, body: &str) -> ServiceError
{   let details = if body.trim().is_empty()
    {   None
    } else
    {   Some(
          serde_json::from_str::<serde_json::Value>(body)
            .unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
        )
    };

    let service_text = details.as_ref().and_then(|d| {
      d.pointer("/error/message")
        .or_else(|| d.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
    });

    let message = match (service_text, &details)
    {   (Some(text), _) => format!("{} {}", status, text)
      , (None, Some(serde_json::Value::String(text)))
          => format!("{} {}", status, text.trim())
      , (None, Some(_)) => format!("{} status code", status)
      , (None, None) => format!("{} status code (no body)", status)
    };

    ServiceError::from_response(status, message, details)
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::ServiceErrorKind;

    fn completion(raw: serde_json::Value) -> ChatCompletion
    {   ChatCompletion
        {   response: serde_json::from_value(raw.clone()).unwrap()
          , raw
        }
    }

    #[test]
    fn request_serializes_single_user_message()
    {   let request = ChatRequest::user_prompt(
          "meta-llama/llama-3-8b", "hi".to_string(), 300, 0.7
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "meta-llama/llama-3-8b");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn first_content_is_trimmed()
    {   let c = completion(serde_json::json!({
          "choices": [{ "message": { "role": "assistant",
                                     "content": "  Rest well. \n" } }]
        }));
        assert_eq!(c.first_content().as_deref(), Some("Rest well."));
    }

    #[test]
    fn missing_or_blank_content_yields_none()
    {   for raw in [
          serde_json::json!({ "choices": [] }),
          serde_json::json!({}),
          serde_json::json!({ "choices": [{ "message": null }] }),
          serde_json::json!({ "choices": [{ "message":
                                { "content": null } }] }),
          serde_json::json!({ "choices": [{ "message":
                                { "content": "   " } }] }),
        ]
        {   assert_eq!(completion(raw.clone()).first_content(), None,
              "{}", raw);
        }
    }

    #[test]
    fn metadata_is_read_verbatim_from_raw_body()
    {   let c = completion(serde_json::json!({
          "model": { "name": "llama", "rev": 3 },
          "created": 1718000000.25,
          "usage": { "total_tokens": 48 },
          "choices": [{ "message": { "content": "ok" } }]
        }));
        assert_eq!(c.created(), Some(serde_json::json!(1718000000.25)));
        assert_eq!(
          c.model(),
          Some(serde_json::json!({ "name": "llama", "rev": 3 }))
        );
        assert_eq!(c.usage(), Some(serde_json::json!({ "total_tokens": 48 })));
        assert_eq!(c.first_content().as_deref(), Some("ok"));
    }

    #[test]
    fn error_body_with_openai_shape()
    {   let err = error_from_body(
          401,
          r#"{"error":{"message":"Incorrect API key provided"}}"#
        );
        assert_eq!(err.kind, ServiceErrorKind::Authentication);
        assert_eq!(err.status, Some(401));
        assert_eq!(err.message, "401 Incorrect API key provided");
        assert!(err.details.is_some());
    }

    #[test]
    fn error_body_plain_text_and_empty()
    {   let err = error_from_body(502, "Bad Gateway");
        assert_eq!(err.message, "502 Bad Gateway");
        assert_eq!(
          err.details,
          Some(serde_json::Value::String("Bad Gateway".to_string()))
        );

        let err = error_from_body(500, "");
        assert_eq!(err.message, "500 status code (no body)");
        assert_eq!(err.details, None);
        assert_eq!(err.kind, ServiceErrorKind::Generic);
    }
}
