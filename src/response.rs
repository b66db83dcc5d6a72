//! Result shapes handed back to callers

use serde::Serialize;
use crate::error::ServiceError;

pub const NO_PREDICTION_MESSAGE: &str
  = "No valid prediction received from the model";
pub const NO_PREDICTION_ERROR: &str
  = "No valid prediction received";

/// Outcome of a call that passed validation.
///
/// Serializes to the plain string or to the matching JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResult
{   /// Plain mode: prediction or human-readable failure message
    Text(String)
  , /// Structured mode, success
    Full(FullPrediction)
  , /// Structured mode, the model returned nothing usable
    Empty(EmptyPrediction)
  , /// Structured mode, the service call failed
    Failed(ErrorResult)
}

impl PredictionResult
{   pub fn as_text(&self) -> Option<&str>
    {   match self
        {   PredictionResult::Text(text) => Some(text)
          , _ => None
        }
    }

    /// Prediction text, only when one was received
    pub fn prediction(&self) -> Option<&str>
    {   match self
        {   PredictionResult::Full(full) => Some(&full.prediction)
          , _ => None
        }
    }

    /// Structured failure or empty answer. Plain mode cannot tell.
    pub fn is_error(&self) -> bool
    {   matches!(
          self,
          PredictionResult::Empty(_) | PredictionResult::Failed(_)
        )
    }

    /// The text a person should see for this outcome
    pub fn message(&self) -> String
    {   match self
        {   PredictionResult::Text(text) => text.clone()
          , PredictionResult::Full(full) => full.prediction.clone()
          , PredictionResult::Empty(_)
              => NO_PREDICTION_MESSAGE.to_string()
          , PredictionResult::Failed(failed) => failed.message
              .clone()
              .unwrap_or_else(|| failed.error.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPrediction
{   pub prediction: String
  , /// Response body as received
    pub full_response: serde_json::Value
  , pub metadata: PredictionMetadata
}

/// Provenance copied verbatim from the service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionMetadata
{   pub model: Option<serde_json::Value>
  , pub usage: Option<serde_json::Value>
  , pub created: Option<serde_json::Value>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyPrediction
{   pub error: String
  , pub response: serde_json::Value
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResult
{   /// Underlying error text
    pub error: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>
}

impl From<&ServiceError> for ErrorResult
{   fn from(err: &ServiceError) -> Self
    {   ErrorResult
        {   error: err.message.clone()
          , status: err.status
          , details: err.details.clone()
          , message: Some(err.user_message())
        }
    }
}
