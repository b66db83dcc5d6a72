//! Prediction inputs, validation and prompt construction

use serde::{Deserialize, Serialize};
use crate::error::ValidationError;

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 150;
pub const NO_MEDICATION: &str = "None";

/// Age as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeInput
{   Number(i64)
  , /// Text such as a form field; parsed on validation
    Text(String)
}

impl AgeInput
{   /// Integer value, if there is one.
    ///
    /// Text is read like a form field: leading whitespace and sign are
    /// accepted, the leading run of digits is taken and anything after
    /// it is ignored. A `0x` prefix switches to hexadecimal.
    pub fn to_integer(&self) -> Option<i64>
    {   match self
        {   AgeInput::Number(n) => Some(*n)
          , AgeInput::Text(text) => parse_leading_integer(text)
        }
    }
}

fn parse_leading_integer(text: &str) -> Option<i64>
{   let s = text.trim_start();
    let (negative, rest) = match s.strip_prefix('-')
    {   Some(rest) => (true, rest)
      , None => (false, s.strip_prefix('+').unwrap_or(s))
    };
    let (radix, digits) = match rest.get(..2)
    {   Some("0x") | Some("0X") => (16, &rest[2..])
      , _ => (10, rest)
    };
    let end = digits
      .find(|c: char| !c.is_digit(radix))
      .unwrap_or(digits.len());
    if end == 0
    {   return None;
    }
    let value = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -value } else { value })
}

impl From<i64> for AgeInput
{   fn from(n: i64) -> Self { AgeInput::Number(n) }
}

impl From<i32> for AgeInput
{   fn from(n: i32) -> Self { AgeInput::Number(n as i64) }
}

impl From<u32> for AgeInput
{   fn from(n: u32) -> Self { AgeInput::Number(n as i64) }
}

impl From<u8> for AgeInput
{   fn from(n: u8) -> Self { AgeInput::Number(n as i64) }
}

impl From<&str> for AgeInput
{   fn from(s: &str) -> Self { AgeInput::Text(s.to_string()) }
}

impl From<String> for AgeInput
{   fn from(s: String) -> Self { AgeInput::Text(s) }
}

/// Unchecked caller input for one prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest
{   pub age: AgeInput
  , pub category: String
  , pub problem_description: String
  , #[serde(default)]
    pub medication: Option<String>
}

impl PredictionRequest
{   pub fn new(
      age: impl Into<AgeInput>
    , category: impl Into<String>
    , problem_description: impl Into<String>
    ) -> Self
    {   PredictionRequest
        {   age: age.into()
          , category: category.into()
          , problem_description: problem_description.into()
          , medication: None
        }
    }

    pub fn with_medication(mut self, medication: impl Into<String>)
      -> Self
    {   self.medication = Some(medication.into());
        self
    }

    /// Check every field, in order, and return the trimmed values
    pub fn validate(&self)
      -> Result<ValidatedRequest, ValidationError>
    {   let age = self.age
          .to_integer()
          .filter(|n| (MIN_AGE..=MAX_AGE).contains(n))
          .ok_or(ValidationError::InvalidAge)?;

        let category = self.category.trim();
        if category.is_empty()
        {   return Err(ValidationError::EmptyCategory);
        }

        let problem_description = self.problem_description.trim();
        if problem_description.is_empty()
        {   return Err(ValidationError::EmptyProblemDescription);
        }

        let medication = self.medication
          .as_deref()
          .map(str::trim)
          .filter(|m| !m.is_empty())
          .map(str::to_string);

        Ok(ValidatedRequest
        {   age: age as u8
          , category: category.to_string()
          , problem_description: problem_description.to_string()
          , medication
        })
    }
}

/// Input that passed validation; fields are trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest
{   age: u8
  , category: String
  , problem_description: String
  , medication: Option<String>
}

impl ValidatedRequest
{   pub fn age(&self) -> u8 { self.age }

    pub fn category(&self) -> &str { &self.category }

    pub fn problem_description(&self) -> &str
    {   &self.problem_description
    }

    pub fn medication(&self) -> Option<&str>
    {   self.medication.as_deref()
    }

    /// The single user message sent to the model
    pub fn prompt(&self) -> String
    {   format!(
          "Predict the health sum-up for a {}-year-old with {} symptoms. \
           Problem description: {}. Medication: {}. \
           Provide a short, simple explanation."
        , self.age
        , self.category
        , self.problem_description
        , self.medication().unwrap_or(NO_MEDICATION)
        )
    }
}

/// Per-call switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionOptions
{   /// Return the structured result instead of plain text
    pub return_full_response: bool
}

impl PredictionOptions
{   pub fn full() -> Self
    {   PredictionOptions { return_full_response: true }
    }
}
