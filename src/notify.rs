//! Notification payloads handed back to the embedding UI. Controllers never
//! render anything themselves; they return a `Notice` and the UI decides how
//! to show it.

pub const APP_NAME: &str = "Polling App";
pub const GENERIC_ERROR_MSG: &str = "Sorry! Something went wrong. Please try again!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Info(msg) | Notice::Error(msg) => msg,
        }
    }
}
