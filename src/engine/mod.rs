//! Seams to the query backend.
//!
//! The shell never interprets query text. It hands each query to an
//! [`Engine`] and receives either a [`ResultPage`] or a [`LocatedError`]
//! pointing into the query. Tab completion goes through a [`Suggester`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod process;

pub use process::ProcessEngine;

/// Executes queries, one page per call.
pub trait Engine {
    fn execute(
        &mut self,
        query: &str,
        resume: Option<&ResumeToken>,
    ) -> Result<ResultPage, LocatedError>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn execute(
        &mut self,
        query: &str,
        resume: Option<&ResumeToken>,
    ) -> Result<ResultPage, LocatedError> {
        (**self).execute(query, resume)
    }
}

/// Best-effort completion text for a partially typed line.
pub trait Suggester {
    fn suggest(&self, partial: &str) -> String;
}

/// Stand-in used when no engine command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl Engine for Unconfigured {
    fn execute(
        &mut self,
        _query: &str,
        _resume: Option<&ResumeToken>,
    ) -> Result<ResultPage, LocatedError> {
        Err(LocatedError::new("no execution engine configured"))
    }
}

impl Suggester for Unconfigured {
    fn suggest(&self, _partial: &str) -> String {
        String::new()
    }
}

/// Continuation marker handed back by the engine (`lastEvaluatedKey`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResumeToken(Value);

impl ResumeToken {
    /// Absent and falsy markers both mean the result set is exhausted.
    pub fn from_marker(marker: Option<&Value>) -> Option<Self> {
        marker.filter(|value| is_truthy(value)).cloned().map(ResumeToken)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Items(Vec<Value>),
    Single(Value),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPage {
    payload: Option<Payload>,
    continuation: Option<ResumeToken>,
}

impl ResultPage {
    /// Interprets a backend response. An object with an `items` array is a
    /// list page; anything else is rendered as a single value.
    pub fn from_json(value: Value) -> Self {
        let continuation = ResumeToken::from_marker(value.get("lastEvaluatedKey"));

        let payload = match value {
            Value::Object(mut map) if map.get("items").is_some_and(Value::is_array) => {
                match map.remove("items") {
                    Some(Value::Array(items)) => Some(Payload::Items(items)),
                    _ => None,
                }
            }
            other if is_truthy(&other) => Some(Payload::Single(other)),
            _ => None,
        };

        ResultPage {
            payload,
            continuation,
        }
    }

    pub fn items(items: Vec<Value>, marker: Option<Value>) -> Self {
        ResultPage {
            payload: Some(Payload::Items(items)),
            continuation: ResumeToken::from_marker(marker.as_ref()),
        }
    }

    pub fn single(value: Value) -> Self {
        ResultPage {
            payload: Some(Payload::Single(value)),
            continuation: None,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn continuation(&self) -> Option<&ResumeToken> {
        self.continuation.as_ref()
    }

    pub fn into_continuation(self) -> Option<ResumeToken> {
        self.continuation
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSpan {
    #[serde(default)]
    pub start_offset: Option<usize>,
    #[serde(default)]
    pub end_offset: Option<usize>,
}

/// A query failure, optionally pinned to a token of the query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedError {
    pub message: String,
    #[serde(default)]
    pub token: Option<TokenSpan>,
    #[serde(default)]
    pub previous_token: Option<TokenSpan>,
}

impl LocatedError {
    pub fn new(message: impl Into<String>) -> Self {
        LocatedError {
            message: message.into(),
            token: None,
            previous_token: None,
        }
    }

    /// Pins the error at the start of the offending token.
    pub fn at_token(mut self, start_offset: usize) -> Self {
        self.token = Some(TokenSpan {
            start_offset: Some(start_offset),
            end_offset: None,
        });
        self
    }

    /// Pins the error just past the last token that parsed.
    pub fn after_token(mut self, end_offset: usize) -> Self {
        self.previous_token = Some(TokenSpan {
            start_offset: None,
            end_offset: Some(end_offset),
        });
        self
    }
}

impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LocatedError {}
