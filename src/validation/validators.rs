use regex::Regex;
use std::sync::OnceLock;

use crate::validation::field::Verdict;

pub const NAME_MIN_LENGTH: usize = 4;
pub const NAME_MAX_LENGTH: usize = 40;
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 15;
pub const EMAIL_MAX_LENGTH: usize = 40;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 20;
pub const POLL_QUESTION_MAX_LENGTH: usize = 140;
pub const POLL_CHOICE_MAX_LENGTH: usize = 40;
pub const MAX_CHOICES: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"[^@ ]+@[^@ ]+\.[^@ ]+").unwrap())
}

pub fn validate_name(name: &str) -> Verdict {
    if name.chars().count() < NAME_MIN_LENGTH {
        Verdict::error(format!(
            "Name is too short (Minimum {} characters needed.)",
            NAME_MIN_LENGTH
        ))
    } else if name.chars().count() > NAME_MAX_LENGTH {
        Verdict::error(format!(
            "Name is too long (Maximum {} characters allowed.)",
            NAME_MAX_LENGTH
        ))
    } else {
        Verdict::success()
    }
}

/// Bounds check only. An in-bounds username stays pending; the availability
/// check is what promotes it to success.
pub fn validate_username(username: &str) -> Verdict {
    if username.chars().count() < USERNAME_MIN_LENGTH {
        Verdict::error(format!(
            "Username is too short (Minimum {} characters needed.)",
            USERNAME_MIN_LENGTH
        ))
    } else if username.chars().count() > USERNAME_MAX_LENGTH {
        Verdict::error(format!(
            "Username is too long (Maximum {} characters allowed.)",
            USERNAME_MAX_LENGTH
        ))
    } else {
        Verdict::pending()
    }
}

/// Same two-phase contract as `validate_username`: this can reject an email
/// but never confirms one on its own.
pub fn validate_email(email: &str) -> Verdict {
    if email.is_empty() {
        return Verdict::error("Email may not be empty");
    }
    if !email_regex().is_match(email) {
        return Verdict::error("Email not valid");
    }
    if email.chars().count() > EMAIL_MAX_LENGTH {
        return Verdict::error(format!(
            "Email is too long (Maximum {} characters allowed)",
            EMAIL_MAX_LENGTH
        ));
    }
    Verdict::pending()
}

pub fn validate_password(password: &str) -> Verdict {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        Verdict::error(format!(
            "Password is too short (Minimum {} characters needed.)",
            PASSWORD_MIN_LENGTH
        ))
    } else if password.chars().count() > PASSWORD_MAX_LENGTH {
        Verdict::error(format!(
            "Password is too long (Maximum {} characters allowed.)",
            PASSWORD_MAX_LENGTH
        ))
    } else {
        Verdict::success()
    }
}

pub fn validate_question(question: &str) -> Verdict {
    if question.is_empty() {
        Verdict::error("Please enter your question!")
    } else if question.chars().count() > POLL_QUESTION_MAX_LENGTH {
        Verdict::error(format!(
            "Question is too long (Maximum {} characters allowed)",
            POLL_QUESTION_MAX_LENGTH
        ))
    } else {
        Verdict::success()
    }
}

pub fn validate_choice(choice: &str) -> Verdict {
    if choice.is_empty() {
        Verdict::error("Please enter a choice!")
    } else if choice.chars().count() > POLL_CHOICE_MAX_LENGTH {
        Verdict::error(format!(
            "Choice is too long (Maximum {} characters allowed)",
            POLL_CHOICE_MAX_LENGTH
        ))
    } else {
        Verdict::success()
    }
}
