use crate::utils;

/// One unit of message content: either text or inline binary image data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE { data_b64: String, mime_type: String },
}
impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }
    pub fn image_b64(data_b64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: data_b64.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMUserType {
    Human,
    AI,
}
impl LLMUserType {
    pub fn from_str(role_str: &str) -> Option<Self> {
        match role_str.trim().to_lowercase().as_str() {
            "user" | "human" => Some(LLMUserType::Human),
            "model" | "ai" | "assistant" => Some(LLMUserType::AI),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub id: String,
    pub role: LLMUserType,
    pub content: Vec<LLMMessageType>,
    pub created_at: i64,
}

impl LLMMessage {
    pub fn new(id: Option<String>, role: &str, content: Vec<LLMMessageType>) -> Self {
        let id = id.unwrap_or_else(|| utils::current_timestamp_millis().to_string());
        Self {
            id,
            role: LLMUserType::from_str(role).unwrap_or(LLMUserType::Human),
            content,
            created_at: utils::current_timestamp_millis() as i64,
        }
    }
}

/// Output kinds the model is allowed to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseModality {
    Text,
    Image,
}
impl ResponseModality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseModality::Text => "TEXT",
            ResponseModality::Image => "IMAGE",
        }
    }
}

#[derive(Clone)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
    pub(crate) response_modalities: Vec<ResponseModality>,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
            response_modalities: Vec::new(),
        }
    }

    pub fn with_response_modalities(mut self, modalities: &[ResponseModality]) -> Self {
        self.response_modalities = modalities.to_vec();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn response_modalities(&self) -> &[ResponseModality] {
        &self.response_modalities
    }
}

// The key must never end up in Debug output or logs.
impl std::fmt::Debug for LLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMClient")
            .field("endpoint", &self.endpoint)
            .field("default_model", &self.default_model)
            .field("response_modalities", &self.response_modalities)
            .finish_non_exhaustive()
    }
}
