use serde::{Deserialize, Serialize};

// === Lead Capture Models ===

#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitResponse {
    /// The fixed visitor-facing acknowledgement.
    pub fn thanks() -> Self {
        Self {
            success: true,
            message: "Thank you! We'll be in touch soon.".to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
