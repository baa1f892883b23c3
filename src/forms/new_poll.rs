use log::error;

use crate::api::{ApiError, PollingApi};
use crate::auth::token_store::TokenStore;
use crate::models::poll_api_model::{ChoiceRequest, NewPollRequest, PollLength};
use crate::notify::Notice;
use crate::validation::field::FieldState;
use crate::validation::validators::{validate_choice, validate_question, MAX_CHOICES};

pub const MAX_POLL_DAYS: u8 = 7;
pub const MAX_POLL_HOURS: u8 = 23;
pub const SESSION_EXPIRED_MSG: &str =
    "You have been logged out. Please login to create a poll.";

#[derive(Debug, PartialEq)]
pub enum NewPollOutcome {
    /// Poll created; the UI should navigate back to the feed.
    Created,
    /// 401 from the backend: the persisted token was cleared and the UI
    /// should redirect to login with the notice.
    SessionExpired(Notice),
    Failed(Notice),
    Invalid,
}

/// Draft of a poll under construction: a question, two to `MAX_CHOICES`
/// choices, and the poll length. The first two choices are mandatory and can
/// never be removed.
#[derive(Debug)]
pub struct NewPollForm {
    pub question: FieldState,
    pub choices: Vec<FieldState>,
    pub poll_length: PollLength,
}

impl Default for NewPollForm {
    fn default() -> Self {
        Self {
            question: FieldState::new(),
            choices: vec![FieldState::new(), FieldState::new()],
            poll_length: PollLength { days: 1, hours: 0 },
        }
    }
}

impl NewPollForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_changed(&mut self, value: &str) {
        self.question.set_value(value, validate_question(value));
    }

    pub fn choice_changed(&mut self, index: usize, value: &str) {
        if let Some(choice) = self.choices.get_mut(index) {
            choice.set_value(value, validate_choice(value));
        }
    }

    pub fn can_add_choice(&self) -> bool {
        self.choices.len() < MAX_CHOICES
    }

    /// Appends an empty choice; no-op once the draft holds `MAX_CHOICES`.
    pub fn add_choice(&mut self) {
        if self.can_add_choice() {
            self.choices.push(FieldState::new());
        }
    }

    /// Removes a choice past the two mandatory ones; anything else is a no-op.
    pub fn remove_choice(&mut self, index: usize) {
        if index > 1 && index < self.choices.len() {
            self.choices.remove(index);
        }
    }

    pub fn poll_days_changed(&mut self, days: u8) {
        if days <= MAX_POLL_DAYS {
            self.poll_length.days = days;
        }
    }

    pub fn poll_hours_changed(&mut self, hours: u8) {
        if hours <= MAX_POLL_HOURS {
            self.poll_length.hours = hours;
        }
    }

    pub fn is_form_invalid(&self) -> bool {
        if !self.question.is_success() {
            return true;
        }
        self.choices.iter().any(|choice| !choice.is_success())
    }

    pub async fn submit(&self, api: &impl PollingApi, tokens: &TokenStore) -> NewPollOutcome {
        if self.is_form_invalid() {
            return NewPollOutcome::Invalid;
        }
        let request = NewPollRequest {
            question: self.question.value.clone(),
            choices: self
                .choices
                .iter()
                .map(|choice| ChoiceRequest {
                    text: choice.value.clone(),
                })
                .collect(),
            poll_length: self.poll_length,
        };
        match api.create_poll(&request).await {
            Ok(_) => NewPollOutcome::Created,
            Err(ApiError::Unauthorized { .. }) => {
                if let Err(e) = tokens.clear() {
                    error!("failed to clear access token on forced logout: {}", e);
                }
                NewPollOutcome::SessionExpired(Notice::Error(SESSION_EXPIRED_MSG.to_string()))
            }
            Err(e) => NewPollOutcome::Failed(Notice::Error(e.user_message())),
        }
    }
}
