use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

macro_rules! debug_println {
    ($($arg:tt)*) => {
        if std::env::var("LEXBAR_DEBUG").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Shown in the error slot when a failure carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Serialize)]
struct LawsRequest<'a> {
    inquiry: &'a str,
}

/// Structured success payload: the service echoes the query and attaches
/// the legal sources supporting its response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub response: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Citation {
    pub source: String,
    pub text: String,
}

/// The success payload shapes the service is known to produce, plus a
/// fallback for anything else. Decided once here so the renderer never
/// has to inspect raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Structured(QueryResponse),
    Plain(String),
    Opaque(String),
}

impl Answer {
    /// Schema check, in precedence order: the structured shape, then a
    /// string `answer` field, then the raw payload serialized verbatim.
    fn from_value(value: Value) -> Answer {
        if let Ok(structured) = QueryResponse::deserialize(&value) {
            return Answer::Structured(structured);
        }
        if let Some(answer) = value.get("answer").and_then(Value::as_str) {
            return Answer::Plain(answer.to_string());
        }
        Answer::Opaque(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }

    /// The body text a user would put on the clipboard.
    pub fn body_text(&self) -> &str {
        match self {
            Answer::Structured(result) => &result.response,
            Answer::Plain(text) | Answer::Opaque(text) => text,
        }
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Request failed with status {0}")]
    Status(u16),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

impl QueryError {
    /// Text for the single error slot in the UI.
    pub fn surface_message(&self) -> String {
        fallback_if_empty(self.to_string())
    }
}

fn fallback_if_empty(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

/// Status is checked before the body is touched; a non-2xx response is a
/// failure no matter what it contains.
fn classify(status: StatusCode, body: &[u8]) -> Result<Answer, QueryError> {
    if !status.is_success() {
        return Err(QueryError::Status(status.as_u16()));
    }
    let value: Value = serde_json::from_slice(body)?;
    Ok(Answer::from_value(value))
}

pub struct LawsClient {
    base_url: String,
    client: reqwest::Client,
}

impl LawsClient {
    pub fn with_config(base_url: String) -> Self {
        LawsClient {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Posts the inquiry and classifies the outcome. Transport errors,
    /// non-2xx statuses and unparseable bodies all come back as
    /// `QueryError`; the caller settles exactly once either way.
    pub async fn query_laws(&self, inquiry: &str) -> Result<Answer, QueryError> {
        let url = format!("{}/query-laws", self.base_url);
        debug_println!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LawsRequest { inquiry })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug_println!("{} <- {} ({} bytes)", status, url, body.len());

        classify(status, &body)
    }
}
