use std::fmt;
use serde::Serialize;

pub const AUTHENTICATION_MESSAGE: &str
  = "Authentication error: Please check API key";
pub const RATE_LIMIT_MESSAGE: &str
  = "Rate limit exceeded: Please try again later";
pub const GENERIC_MESSAGE_PREFIX: &str
  = "Error getting prediction: ";

/// Caller misuse detected before any request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError
{   /// Age missing, non-numeric or outside 0..=150
    InvalidAge
  , /// Category empty after trimming
    EmptyCategory
  , /// Problem description empty after trimming
    EmptyProblemDescription
}

impl fmt::Display for ValidationError
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   ValidationError::InvalidAge => {
              write!(f,
                "Age must be a valid number between 0 and 150"
              )
            }
          , ValidationError::EmptyCategory => {
              write!(f, "Category must be a non-empty string")
            }
          , ValidationError::EmptyProblemDescription => {
              write!(f,
                "Problem description must be a non-empty string"
              )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Category of a remote failure, decided by status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceErrorKind
{   Authentication
  , RateLimit
  , Generic
}

impl ServiceErrorKind
{   pub fn from_status(status: Option<u16>) -> Self
    {   match status
        {   Some(401) => ServiceErrorKind::Authentication
          , Some(429) => ServiceErrorKind::RateLimit
          , _ => ServiceErrorKind::Generic
        }
    }
}

/// Human-readable message for a failure category.
///
/// `raw` is only used by the generic category.
pub fn describe(kind: ServiceErrorKind, raw: &str) -> String
{   match kind
    {   ServiceErrorKind::Authentication
          => AUTHENTICATION_MESSAGE.to_string()
      , ServiceErrorKind::RateLimit
          => RATE_LIMIT_MESSAGE.to_string()
      , ServiceErrorKind::Generic
          => format!("{}{}", GENERIC_MESSAGE_PREFIX, raw)
    }
}

/// Failure talking to the chat-completion service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError
{   pub kind: ServiceErrorKind
  , /// Underlying error text
    pub message: String
  , /// HTTP status, when the service answered at all
    pub status: Option<u16>
  , /// Body attached to an error response
    pub details: Option<serde_json::Value>
}

impl ServiceError
{   /// Error response received from the service
    pub fn from_response(
      status: u16
    , message: String
    , details: Option<serde_json::Value>
    ) -> Self
    {   ServiceError
        {   kind: ServiceErrorKind::from_status(Some(status))
          , message
          , status: Some(status)
          , details
        }
    }

    /// Failure with no HTTP status (connection, decoding)
    pub fn transport(message: String) -> Self
    {   ServiceError
        {   kind: ServiceErrorKind::Generic
          , message
          , status: None
          , details: None
        }
    }

    pub fn user_message(&self) -> String
    {   describe(self.kind, &self.message)
    }
}

impl fmt::Display for ServiceError
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self.status
        {   Some(status) => {
              write!(f, "Service error ({}): {}", status, self.message)
            }
          , None => {
              write!(f, "Service error: {}", self.message)
            }
        }
    }
}

impl std::error::Error for ServiceError {}
