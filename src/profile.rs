use log::error;

use crate::api::{ApiError, PollingApi};
use crate::models::poll_api_model::UserProfile;

/// What the profile page should render. Full-page loads get dedicated
/// not-found and server-error views instead of a transient notification.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Loading,
    Loaded(UserProfile),
    NotFound,
    ServerError,
}

pub struct ProfileController {
    username: String,
    generation: u64,
    state: ProfileState,
}

/// Handle for one in-flight profile request; stale resolutions are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFetch {
    pub username: String,
    generation: u64,
}

impl ProfileController {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            generation: 0,
            state: ProfileState::Loading,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn reset(&mut self) -> ProfileFetch {
        self.generation += 1;
        self.state = ProfileState::Loading;
        ProfileFetch {
            username: self.username.clone(),
            generation: self.generation,
        }
    }

    /// Re-targets the controller when the route's username changes.
    pub fn switch_user(&mut self, username: impl Into<String>) -> Option<ProfileFetch> {
        let username = username.into();
        if username == self.username {
            return None;
        }
        self.username = username;
        Some(self.reset())
    }

    pub fn apply(&mut self, fetch: &ProfileFetch, result: Result<UserProfile, ApiError>) {
        if fetch.generation != self.generation {
            return;
        }
        self.state = match result {
            Ok(profile) => ProfileState::Loaded(profile),
            Err(e) if e.is_not_found() => ProfileState::NotFound,
            Err(e) => {
                error!("failed to load profile {}: {}", fetch.username, e);
                ProfileState::ServerError
            }
        };
    }

    pub async fn run_fetch(&mut self, api: &impl PollingApi, fetch: ProfileFetch) {
        let result = api.get_user_profile(&fetch.username).await;
        self.apply(&fetch, result);
    }
}
