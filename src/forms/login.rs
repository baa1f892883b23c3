use log::error;

use crate::api::{ApiError, PollingApi};
use crate::auth::token_store::TokenStore;
use crate::models::poll_api_model::LoginRequest;
use crate::notify::{Notice, GENERIC_ERROR_MSG};
use crate::validation::field::{FieldState, Verdict};

pub const BAD_CREDENTIALS_MSG: &str =
    "Your Username or Password is incorrect. Please try again!";

#[derive(Debug, PartialEq)]
pub enum LoginOutcome {
    /// Token persisted; the UI should proceed to the signed-in view.
    LoggedIn,
    BadCredentials(Notice),
    Failed(Notice),
    Invalid,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username_or_email: FieldState,
    pub password: FieldState,
}

fn validate_required(value: &str, msg: &str) -> Verdict {
    if value.is_empty() {
        Verdict::error(msg)
    } else {
        Verdict::success()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username_or_email_changed(&mut self, value: &str) {
        self.username_or_email.set_value(
            value,
            validate_required(value, "Please input your username or email!"),
        );
    }

    pub fn password_changed(&mut self, value: &str) {
        self.password
            .set_value(value, validate_required(value, "Please input your Password!"));
    }

    pub fn is_form_invalid(&self) -> bool {
        !(self.username_or_email.is_success() && self.password.is_success())
    }

    pub async fn submit(&self, api: &impl PollingApi, tokens: &TokenStore) -> LoginOutcome {
        if self.is_form_invalid() {
            return LoginOutcome::Invalid;
        }
        let request = LoginRequest {
            username_or_email: self.username_or_email.value.clone(),
            password: self.password.value.clone(),
        };
        match api.login(&request).await {
            Ok(auth) => {
                if let Err(e) = tokens.save(&auth.access_token) {
                    error!("failed to persist access token: {}", e);
                    return LoginOutcome::Failed(Notice::Error(GENERIC_ERROR_MSG.to_string()));
                }
                LoginOutcome::LoggedIn
            }
            Err(ApiError::Unauthorized { .. }) => {
                LoginOutcome::BadCredentials(Notice::Error(BAD_CREDENTIALS_MSG.to_string()))
            }
            Err(e) => LoginOutcome::Failed(Notice::Error(e.user_message())),
        }
    }
}
