// src/chat/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// One persisted exchange: the user's message and the companion's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

// Request types for API

// Fields are optional so missing ones surface as a 400 with the expected
// message instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearHistoryRequest {
    pub user_id: Option<String>,
}
