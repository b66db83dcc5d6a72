//! medpredict: short health predictions from a hosted chat model.
//!
//! A caller fills in a [`PredictionRequest`] (age, symptom category,
//! problem description, optional medication) and hands it to
//! [`PredictionClient::get_prediction`]. Input is validated before
//! anything is sent; service failures come back as values, never as
//! errors.
//!
//! ```no_run
//! use medpredict::{
//!   PredictionClient, PredictionConfig, PredictionOptions,
//!   PredictionRequest,
//! };
//!
//! # async fn run() -> Result<(), medpredict::ValidationError> {
//! let client = PredictionClient::new(PredictionConfig::from_env());
//! let request = PredictionRequest::new(
//!   45, "chronic pain", "persistent lower back pain for 3 months"
//! ).with_medication("naproxen");
//!
//! let result = client
//!   .get_prediction(&request, PredictionOptions::default())
//!   .await?;
//! println!("{}", result.message());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod response;
pub mod client;

pub use client::PredictionClient;
pub use config::PredictionConfig;
pub use error::{ServiceError, ServiceErrorKind, ValidationError};
pub use request::{
  AgeInput, PredictionOptions, PredictionRequest, ValidatedRequest,
};
pub use response::{
  EmptyPrediction, ErrorResult, FullPrediction, PredictionMetadata,
  PredictionResult,
};
