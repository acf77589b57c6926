use serde::{Deserialize, Serialize};

// REQUEST
//////////

/// Body of `POST /api/generate`
#[derive(Serialize, Debug)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    // base64, exactly one
    pub images: Vec<String>,
}

impl GenerateRequest {
    pub fn new(model: &str, prompt: &str, image: String) -> Self {
        GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
            images: vec![image],
        }
    }
}

// RESPONSE
///////////

/// Non-streamed generate response. Durations are in nanoseconds.
///
/// Absent fields fall back to zero values, a body that is not JSON or has
/// wrongly typed fields does not parse.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct GenerateResponse {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
    pub done_reason: String,
    pub context: Vec<i64>,
    pub total_duration: i64,
    pub load_duration: i64,
    pub prompt_eval_count: i64,
    pub prompt_eval_duration: i64,
    pub eval_count: i64,
    pub eval_duration: i64,
}

/// What the server sends back on failure
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
