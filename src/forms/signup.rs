use log::error;

use crate::api::{ApiResult, PollingApi};
use crate::models::poll_api_model::{Availability, SignupRequest};
use crate::notify::Notice;
use crate::validation::field::{FieldState, Verdict};
use crate::validation::validators::{
    validate_email, validate_name, validate_password, validate_username,
};

pub const SIGNUP_SUCCESS_MSG: &str =
    "Thank you! You're successfully registered. Please Login to continue!";

#[derive(Debug, PartialEq)]
pub enum SignupOutcome {
    /// Account created; the UI should navigate to login and show the notice.
    Registered(Notice),
    Rejected(Notice),
    /// The aggregate validity gate refused the submission.
    Invalid,
}

#[derive(Debug, Default)]
pub struct SignupForm {
    pub name: FieldState,
    pub username: FieldState,
    pub email: FieldState,
    pub password: FieldState,
}

fn availability_verdict(result: ApiResult<Availability>, taken_msg: &str) -> Verdict {
    match result {
        Ok(check) if check.available => Verdict::success(),
        Ok(_) => Verdict::error(taken_msg),
        Err(e) => {
            // Fail open: the server re-validates at signup time, so an
            // unreachable check must not block registration.
            error!("availability check failed, passing field: {}", e);
            Verdict::success()
        }
    }
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_changed(&mut self, value: &str) {
        self.name.set_value(value, validate_name(value));
    }

    pub fn username_changed(&mut self, value: &str) {
        self.username.set_value(value, validate_username(value));
    }

    pub fn email_changed(&mut self, value: &str) {
        self.email.set_value(value, validate_email(value));
    }

    pub fn password_changed(&mut self, value: &str) {
        self.password.set_value(value, validate_password(value));
    }

    /// Blur handler for the username field. Runs the bounds check first and
    /// only consults the backend when it passes.
    pub async fn check_username_availability(&mut self, api: &impl PollingApi) {
        let value = self.username.value.clone();
        let sync = validate_username(&value);
        if sync.is_error() {
            self.username.apply(sync);
            return;
        }
        self.username.apply(Verdict::validating());
        let verdict = availability_verdict(
            api.check_username_availability(&value).await,
            "This username is already taken",
        );
        // Ignore the result if the user kept typing while it was in flight.
        if self.username.value == value {
            self.username.apply(verdict);
        }
    }

    /// Blur handler for the email field; same two-phase sequence.
    pub async fn check_email_availability(&mut self, api: &impl PollingApi) {
        let value = self.email.value.clone();
        let sync = validate_email(&value);
        if sync.is_error() {
            self.email.apply(sync);
            return;
        }
        self.email.apply(Verdict::validating());
        let verdict = availability_verdict(
            api.check_email_availability(&value).await,
            "This Email is already registered",
        );
        if self.email.value == value {
            self.email.apply(verdict);
        }
    }

    pub fn is_form_invalid(&self) -> bool {
        !(self.name.is_success()
            && self.username.is_success()
            && self.email.is_success()
            && self.password.is_success())
    }

    pub async fn submit(&self, api: &impl PollingApi) -> SignupOutcome {
        if self.is_form_invalid() {
            return SignupOutcome::Invalid;
        }
        let request = SignupRequest {
            name: self.name.value.clone(),
            username: self.username.value.clone(),
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        };
        match api.signup(&request).await {
            Ok(_) => SignupOutcome::Registered(Notice::Success(SIGNUP_SUCCESS_MSG.to_string())),
            Err(e) => SignupOutcome::Rejected(Notice::Error(e.user_message())),
        }
    }
}
