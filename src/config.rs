//! Configuration for the prediction client

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str
  = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str
  = "meta-llama/llama-3-8b";

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "PREDICTION_MODEL";

/// Connection settings, fixed once the client is built.
///
/// Nothing here is checked up front: a missing or wrong key shows up
/// as an authentication failure on the first call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionConfig
{   /// Bearer credential
    pub api_key: Option<String>
  , /// API base URL (if custom)
    pub api_base: Option<String>
  , /// Model identifier (if not the default)
    pub model: Option<String>
}

impl PredictionConfig
{   /// Read settings from the process environment
    pub fn from_env() -> Self
    {   PredictionConfig
        {   api_key: env_value(API_KEY_ENV)
          , api_base: env_value(API_BASE_ENV)
          , model: env_value(MODEL_ENV)
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self
    {   self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self
    {   self.api_base = Some(base.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self
    {   self.model = Some(model.into());
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> String
    {   self.api_base
          .as_deref()
          .unwrap_or(DEFAULT_API_BASE)
          .trim_end_matches('/')
          .to_string()
    }

    pub fn model_name(&self) -> &str
    {   self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

fn env_value(name: &str) -> Option<String>
{   std::env::var(name)
      .ok()
      .filter(|v| !v.trim().is_empty())
}
