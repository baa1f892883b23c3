use crate::models::poll_api_model::{
    ApiMessage, AuthResponse, Availability, LoginRequest, NewPollRequest, PollListPage,
    PollRecord, SignupRequest, UserProfile, VoteRequest,
};

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};

/// The backend surface the controllers are written against. `ApiClient` is
/// the real implementation; tests substitute a stub.
pub trait PollingApi {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = ApiResult<AuthResponse>> + Send;
    fn signup(
        &self,
        request: &SignupRequest,
    ) -> impl std::future::Future<Output = ApiResult<ApiMessage>> + Send;
    fn check_username_availability(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = ApiResult<Availability>> + Send;
    fn check_email_availability(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = ApiResult<Availability>> + Send;
    fn create_poll(
        &self,
        request: &NewPollRequest,
    ) -> impl std::future::Future<Output = ApiResult<PollRecord>> + Send;
    fn get_all_polls(
        &self,
        page: u32,
        size: u32,
    ) -> impl std::future::Future<Output = ApiResult<PollListPage>> + Send;
    fn get_user_created_polls(
        &self,
        username: &str,
        page: u32,
        size: u32,
    ) -> impl std::future::Future<Output = ApiResult<PollListPage>> + Send;
    fn get_user_voted_polls(
        &self,
        username: &str,
        page: u32,
        size: u32,
    ) -> impl std::future::Future<Output = ApiResult<PollListPage>> + Send;
    fn cast_vote(
        &self,
        request: &VoteRequest,
    ) -> impl std::future::Future<Output = ApiResult<PollRecord>> + Send;
    fn delete_poll(
        &self,
        poll_id: i64,
    ) -> impl std::future::Future<Output = ApiResult<ApiMessage>> + Send;
    fn get_user_profile(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = ApiResult<UserProfile>> + Send;
}
