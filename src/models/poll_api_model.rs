use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Availability {
    pub available: bool,
}

/// Generic `{success, message}` acknowledgement the backend sends for
/// mutations that return no entity.
#[derive(Deserialize, Serialize, Debug)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChoiceRequest {
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollLength {
    pub days: u8,
    pub hours: u8,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewPollRequest {
    pub question: String,
    pub choices: Vec<ChoiceRequest>,
    pub poll_length: PollLength,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub poll_id: i64,
    pub choice_id: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRecord {
    pub id: i64,
    pub text: String,
    pub vote_count: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// A poll as the backend reports it. The client never patches individual
/// fields; vote responses replace the whole record.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollRecord {
    pub id: i64,
    pub question: String,
    pub choices: Vec<ChoiceRecord>,
    pub created_by: UserSummary,
    pub creation_date_time: DateTime<Utc>,
    pub expiration_date_time: DateTime<Utc>,
    pub is_expired: bool,
    #[serde(default)]
    pub selected_choice: Option<i64>,
    pub total_votes: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollListPage {
    pub content: Vec<PollRecord>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub joined_at: DateTime<Utc>,
    pub poll_count: u64,
    pub vote_count: u64,
}
