use log::error;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::{ApiError, ApiResult, PollingApi};
use crate::auth::token_store::TokenStore;
use crate::models::poll_api_model::{
    ApiMessage, AuthResponse, Availability, LoginRequest, NewPollRequest, PollListPage,
    PollRecord, SignupRequest, UserProfile, VoteRequest,
};
use crate::notify::GENERIC_ERROR_MSG;

/// Error body shape the backend uses for non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn init(base_url: &str, tokens: TokenStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the bearer token if one is persisted. The store is read on
    /// every call; there is no in-memory copy to go stale after a logout.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        // Error bodies are not guaranteed to be JSON (proxies, empty 401s),
        // so fall back to the generic text when parsing fails.
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.message),
            Err(_) => None,
        }
        .unwrap_or_else(|| GENERIC_ERROR_MSG.to_string());
        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized { message }),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { message }),
            _ => {
                error!("api request failed with {}: {}", status, message);
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn get_polls_page(&self, path: &str, page: u32, size: u32) -> ApiResult<PollListPage> {
        let request = self
            .http
            .get(self.url(path))
            .query(&[("page", page), ("size", size)]);
        Self::parse(self.authorize(request).send().await?).await
    }
}

impl PollingApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        let response = self
            .http
            .post(self.url("/auth/signin"))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn signup(&self, request: &SignupRequest) -> ApiResult<ApiMessage> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn check_username_availability(&self, username: &str) -> ApiResult<Availability> {
        let response = self
            .http
            .get(self.url("/user/checkUsernameAvailability"))
            .query(&[("username", username)])
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn check_email_availability(&self, email: &str) -> ApiResult<Availability> {
        let response = self
            .http
            .get(self.url("/user/checkEmailAvailability"))
            .query(&[("email", email)])
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_poll(&self, request: &NewPollRequest) -> ApiResult<PollRecord> {
        let builder = self.http.post(self.url("/polls")).json(request);
        Self::parse(self.authorize(builder).send().await?).await
    }

    async fn get_all_polls(&self, page: u32, size: u32) -> ApiResult<PollListPage> {
        self.get_polls_page("/polls", page, size).await
    }

    async fn get_user_created_polls(
        &self,
        username: &str,
        page: u32,
        size: u32,
    ) -> ApiResult<PollListPage> {
        self.get_polls_page(&format!("/users/{}/polls", username), page, size)
            .await
    }

    async fn get_user_voted_polls(
        &self,
        username: &str,
        page: u32,
        size: u32,
    ) -> ApiResult<PollListPage> {
        self.get_polls_page(&format!("/users/{}/votes", username), page, size)
            .await
    }

    async fn cast_vote(&self, request: &VoteRequest) -> ApiResult<PollRecord> {
        let builder = self
            .http
            .post(self.url(&format!("/polls/{}/votes", request.poll_id)))
            .json(request);
        Self::parse(self.authorize(builder).send().await?).await
    }

    async fn delete_poll(&self, poll_id: i64) -> ApiResult<ApiMessage> {
        let builder = self.http.delete(self.url(&format!("/polls/{}", poll_id)));
        Self::parse(self.authorize(builder).send().await?).await
    }

    async fn get_user_profile(&self, username: &str) -> ApiResult<UserProfile> {
        let response = self
            .http
            .get(self.url(&format!("/users/{}", username)))
            .send()
            .await?;
        Self::parse(response).await
    }
}
