use log::{debug, error};
use crate::config::PredictionConfig;
use crate::error::{ServiceError, ValidationError};
use crate::providers::openai::{ChatCompletion, ChatRequest, OpenAiChat};
use crate::request::{PredictionOptions, PredictionRequest};
use crate::response::{
  EmptyPrediction, ErrorResult, FullPrediction, PredictionMetadata,
  PredictionResult, NO_PREDICTION_ERROR, NO_PREDICTION_MESSAGE,
};

/// Output length limit sent with every request
pub const MAX_TOKENS: usize = 300;
/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

/// Turns medical context into a model prediction.
///
/// Holds no per-call state; one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct PredictionClient
{   chat: OpenAiChat
  , model: String
}

impl PredictionClient
{   /// Create a client with a default HTTP client
    pub fn new(config: PredictionConfig) -> Self
    {   Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client around a caller-built HTTP client
    pub fn with_client(
      http_client: reqwest::Client
    , config: PredictionConfig
    ) -> Self
    {   debug!("Creating PredictionClient");
        let chat = OpenAiChat::new(
          http_client,
          config.base_url(),
          config.api_key.clone()
        );
        PredictionClient
        {   chat
          , model: config.model_name().to_string()
        }
    }

    pub fn model(&self) -> &str
    {   &self.model
    }

    /// Validate, ask the model, and shape the answer.
    ///
    /// Only invalid input is returned as `Err`, and nothing is sent in
    /// that case. Service failures come back as `Ok` with a message.
    pub async fn get_prediction(
      &self
    , request: &PredictionRequest
    , options: PredictionOptions
    ) -> Result<PredictionResult, ValidationError>
    {   let validated = request.validate()?;
        let prompt = validated.prompt();
        debug!("Requesting prediction from: {}", self.model);

        let chat_request = ChatRequest::user_prompt(
          &self.model, prompt, MAX_TOKENS, TEMPERATURE
        );

        let result = match self.chat.create(&chat_request).await
        {   Ok(completion) => shape_completion(
              completion, options.return_full_response
            )
          , Err(err) => {
              error!("Prediction API error: {}", err.message);
              shape_failure(&err, options.return_full_response)
            }
        };
        Ok(result)
    }
}

fn shape_completion(completion: ChatCompletion, full: bool)
  -> PredictionResult
{   let prediction = match completion.first_content()
    {   Some(text) => text
      , None => {
          debug!("Completion carried no usable content");
          return if full
          {   PredictionResult::Empty(EmptyPrediction
              {   error: NO_PREDICTION_ERROR.to_string()
                , response: completion.raw
              })
          } else
          {   PredictionResult::Text(NO_PREDICTION_MESSAGE.to_string())
          };
        }
    };

    if !full
    {   return PredictionResult::Text(prediction);
    }

    let metadata = PredictionMetadata
    {   model: completion.model()
      , usage: completion.usage()
      , created: completion.created()
    };
    PredictionResult::Full(FullPrediction
    {   prediction
      , full_response: completion.raw
      , metadata
    })
}

fn shape_failure(err: &ServiceError, full: bool) -> PredictionResult
{   if full
    {   PredictionResult::Failed(ErrorResult::from(err))
    } else
    {   PredictionResult::Text(err.user_message())
    }
}
