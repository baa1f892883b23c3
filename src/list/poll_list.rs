use log::error;

use crate::api::{ApiError, PollingApi};
use crate::auth::token_store::TokenStore;
use crate::models::poll_api_model::{PollListPage, PollRecord, VoteRequest};
use crate::notify::Notice;

pub const LOGIN_TO_VOTE_MSG: &str = "Please login to vote.";
pub const VOTE_SESSION_EXPIRED_MSG: &str = "You have been logged out. Please login to vote";
pub const DELETE_SESSION_EXPIRED_MSG: &str =
    "You have been logged out. Please login to continue.";

/// Identity of the collection a list shows. Switching identity (profile tabs,
/// feed vs. profile) resets the whole controller; nothing is patched across
/// collections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollCollection {
    All,
    UserCreated(String),
    UserVoted(String),
}

/// Accumulated list state. `current_votes` is index-aligned with `polls`:
/// one pending choice selection per visible poll.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    pub polls: Vec<PollRecord>,
    pub current_votes: Vec<Option<i64>>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
    pub is_loading: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            polls: Vec::new(),
            current_votes: Vec::new(),
            page: 0,
            size: 0,
            total_elements: 0,
            total_pages: 0,
            // No load-more until the first page reports otherwise.
            last: true,
            is_loading: false,
        }
    }
}

/// Handle for one in-flight page request. Carries the generation it was
/// issued under so a resolution arriving after a reset is discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageFetch {
    pub collection: PollCollection,
    pub page: u32,
    pub size: u32,
    generation: u64,
}

#[derive(Debug, PartialEq)]
pub enum VoteOutcome {
    Voted,
    /// No session: redirect to login with the notice, no network call made.
    LoginRequired(Notice),
    NoSelection,
    SessionExpired(Notice),
    Failed(Notice),
}

#[derive(Debug, PartialEq)]
pub enum RemoveOutcome {
    Removed,
    LoginRequired,
    SessionExpired(Notice),
    Failed(Notice),
}

pub struct PollListController {
    collection: PollCollection,
    page_size: u32,
    generation: u64,
    state: ListState,
}

impl PollListController {
    pub fn new(collection: PollCollection, page_size: u32) -> Self {
        Self {
            collection,
            page_size,
            generation: 0,
            state: ListState::default(),
        }
    }

    pub fn collection(&self) -> &PollCollection {
        &self.collection
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    fn fetch(&self, page: u32) -> PageFetch {
        PageFetch {
            collection: self.collection.clone(),
            page,
            size: self.page_size,
            generation: self.generation,
        }
    }

    fn is_current(&self, fetch: &PageFetch) -> bool {
        fetch.generation == self.generation
    }

    /// Drops everything accumulated so far and starts over at page 0. Bumping
    /// the generation orphans every fetch still in flight.
    pub fn reset(&mut self) -> PageFetch {
        self.generation += 1;
        self.state = ListState {
            is_loading: true,
            ..ListState::default()
        };
        self.fetch(0)
    }

    /// Points the list at a different collection. Same identity is a no-op;
    /// a new identity resets and returns the page-0 fetch to run.
    pub fn switch_collection(&mut self, collection: PollCollection) -> Option<PageFetch> {
        if collection == self.collection {
            return None;
        }
        self.collection = collection;
        Some(self.reset())
    }

    /// Requests the next page. Meaningless while a fetch is in flight or once
    /// the backend reported the last page.
    pub fn load_more(&mut self) -> Option<PageFetch> {
        if self.state.is_loading || self.state.last {
            return None;
        }
        self.state.is_loading = true;
        Some(self.fetch(self.state.page + 1))
    }

    /// Folds a resolved page into the list: appends the records, extends the
    /// vote selections with empty slots, adopts the page metadata. A stale
    /// fetch is discarded untouched.
    pub fn apply_page(&mut self, fetch: &PageFetch, response: PollListPage) {
        if !self.is_current(fetch) {
            return;
        }
        self.state
            .current_votes
            .extend(std::iter::repeat(None).take(response.content.len()));
        self.state.polls.extend(response.content);
        self.state.page = response.page;
        self.state.size = response.size;
        self.state.total_elements = response.total_elements;
        self.state.total_pages = response.total_pages;
        self.state.last = response.last;
        self.state.is_loading = false;
    }

    /// Failure path: just turn the loading flag back off.
    pub fn fetch_failed(&mut self, fetch: &PageFetch) {
        if !self.is_current(fetch) {
            return;
        }
        self.state.is_loading = false;
    }

    /// Runs a fetch against the right endpoint for its collection and folds
    /// the result in. Errors are swallowed (logged) per the UI contract.
    pub async fn run_fetch(&mut self, api: &impl PollingApi, fetch: PageFetch) {
        let result = match &fetch.collection {
            PollCollection::All => api.get_all_polls(fetch.page, fetch.size).await,
            PollCollection::UserCreated(username) => {
                api.get_user_created_polls(username, fetch.page, fetch.size).await
            }
            PollCollection::UserVoted(username) => {
                api.get_user_voted_polls(username, fetch.page, fetch.size).await
            }
        };
        match result {
            Ok(page) => self.apply_page(&fetch, page),
            Err(e) => {
                error!("failed to load poll page {}: {}", fetch.page, e);
                self.fetch_failed(&fetch);
            }
        }
    }

    /// Local-only selection of a choice; nothing goes over the wire.
    pub fn record_vote_selection(&mut self, index: usize, choice_id: i64) {
        if let Some(slot) = self.state.current_votes.get_mut(index) {
            *slot = Some(choice_id);
        }
    }

    /// Sends the pending selection for `polls[index]`. On success the server
    /// record replaces ours wholesale; the tallies are its to compute.
    pub async fn submit_vote(
        &mut self,
        index: usize,
        api: &impl PollingApi,
        tokens: &TokenStore,
    ) -> VoteOutcome {
        if !tokens.is_authenticated() {
            return VoteOutcome::LoginRequired(Notice::Info(LOGIN_TO_VOTE_MSG.to_string()));
        }
        let Some(poll) = self.state.polls.get(index) else {
            error!("vote submitted for missing poll index {}", index);
            return VoteOutcome::NoSelection;
        };
        let Some(choice_id) = self.state.current_votes.get(index).copied().flatten() else {
            return VoteOutcome::NoSelection;
        };
        let request = VoteRequest {
            poll_id: poll.id,
            choice_id,
        };
        let generation = self.generation;
        match api.cast_vote(&request).await {
            Ok(updated) => {
                if generation == self.generation {
                    self.state.polls[index] = updated;
                }
                VoteOutcome::Voted
            }
            Err(ApiError::Unauthorized { .. }) => {
                if let Err(e) = tokens.clear() {
                    error!("failed to clear access token on forced logout: {}", e);
                }
                VoteOutcome::SessionExpired(Notice::Error(VOTE_SESSION_EXPIRED_MSG.to_string()))
            }
            Err(e) => VoteOutcome::Failed(Notice::Error(e.user_message())),
        }
    }

    /// Deletes `polls[index]` (creator only, enforced server-side). Removal
    /// matches by poll id, not index, and splices the vote selection out in
    /// the same step so the two sequences stay aligned.
    pub async fn remove_poll(
        &mut self,
        index: usize,
        api: &impl PollingApi,
        tokens: &TokenStore,
    ) -> RemoveOutcome {
        if !tokens.is_authenticated() {
            return RemoveOutcome::LoginRequired;
        }
        let Some(poll) = self.state.polls.get(index) else {
            error!("delete requested for missing poll index {}", index);
            return RemoveOutcome::Failed(Notice::Error(
                crate::notify::GENERIC_ERROR_MSG.to_string(),
            ));
        };
        let poll_id = poll.id;
        let generation = self.generation;
        match api.delete_poll(poll_id).await {
            Ok(_) => {
                if generation == self.generation {
                    if let Some(pos) = self.state.polls.iter().position(|p| p.id == poll_id) {
                        self.state.polls.remove(pos);
                        self.state.current_votes.remove(pos);
                    }
                }
                RemoveOutcome::Removed
            }
            Err(ApiError::Unauthorized { .. }) => {
                if let Err(e) = tokens.clear() {
                    error!("failed to clear access token on forced logout: {}", e);
                }
                RemoveOutcome::SessionExpired(Notice::Error(
                    DELETE_SESSION_EXPIRED_MSG.to_string(),
                ))
            }
            Err(e) => {
                error!("failed to delete poll {}: {}", poll_id, e);
                RemoveOutcome::Failed(Notice::Error(e.user_message()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{sample_page, sample_poll, StubApi};
    use std::sync::atomic::{AtomicU32, Ordering};

    const PAGE_SIZE: u32 = 30;

    fn temp_tokens(authenticated: bool) -> TokenStore {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let store = TokenStore::init(std::env::temp_dir().join(format!(
            "polling-app-list-test-{}-{}",
            std::process::id(),
            n
        )));
        if authenticated {
            store.save("jwt-token").unwrap();
        }
        store
    }

    fn loaded_controller(ids: &[i64], last: bool) -> PollListController {
        let mut controller = PollListController::new(PollCollection::All, PAGE_SIZE);
        let fetch = controller.reset();
        controller.apply_page(&fetch, sample_page(ids, 0, last));
        controller
    }

    #[test]
    fn reset_starts_loading_page_zero() {
        let mut controller = PollListController::new(PollCollection::All, PAGE_SIZE);
        let fetch = controller.reset();
        assert_eq!(fetch.page, 0);
        assert_eq!(fetch.size, PAGE_SIZE);
        assert!(controller.state().is_loading);
        assert!(controller.state().last);
    }

    #[test]
    fn apply_page_appends_and_keeps_votes_aligned() {
        let mut controller = loaded_controller(&[1, 2], false);
        assert_eq!(controller.state().polls.len(), 2);
        assert_eq!(controller.state().current_votes, vec![None, None]);
        assert!(!controller.state().is_loading);
        assert!(!controller.state().last);

        let fetch = controller.load_more().expect("load_more should fire");
        assert_eq!(fetch.page, 1);
        controller.apply_page(&fetch, sample_page(&[3, 4, 5], 1, true));

        let state = controller.state();
        assert_eq!(state.polls.len(), 5);
        assert_eq!(state.current_votes.len(), state.polls.len());
        assert_eq!(state.page, 1);
        assert!(state.last);
    }

    #[test]
    fn load_more_is_gated_on_loading_and_last() {
        let mut controller = PollListController::new(PollCollection::All, PAGE_SIZE);
        let fetch = controller.reset();
        // Still loading page 0.
        assert_eq!(controller.load_more(), None);
        controller.apply_page(&fetch, sample_page(&[1], 0, true));
        // Last page observed.
        assert_eq!(controller.load_more(), None);
    }

    #[test]
    fn stale_page_is_discarded() {
        let mut controller = PollListController::new(PollCollection::All, PAGE_SIZE);
        let stale = controller.reset();
        let fresh = controller
            .switch_collection(PollCollection::UserCreated("alice".to_string()))
            .expect("identity changed");

        controller.apply_page(&stale, sample_page(&[1, 2], 0, true));
        assert!(controller.state().polls.is_empty());
        assert!(controller.state().is_loading);

        controller.apply_page(&fresh, sample_page(&[3], 0, true));
        assert_eq!(controller.state().polls.len(), 1);
        assert_eq!(controller.state().polls[0].id, 3);
    }

    #[test]
    fn switching_to_the_same_collection_is_a_no_op() {
        let mut controller = loaded_controller(&[1], true);
        assert_eq!(controller.switch_collection(PollCollection::All), None);
        assert_eq!(controller.state().polls.len(), 1);
    }

    #[test]
    fn stale_failure_does_not_stop_the_fresh_load() {
        let mut controller = PollListController::new(PollCollection::All, PAGE_SIZE);
        let stale = controller.reset();
        let _fresh = controller
            .switch_collection(PollCollection::UserVoted("bob".to_string()))
            .unwrap();
        controller.fetch_failed(&stale);
        assert!(controller.state().is_loading);
    }

    #[test]
    fn failed_fetch_only_clears_the_loading_flag() {
        let mut controller = loaded_controller(&[1, 2], false);
        let fetch = controller.load_more().unwrap();
        controller.fetch_failed(&fetch);
        let state = controller.state();
        assert!(!state.is_loading);
        assert_eq!(state.polls.len(), 2);
        assert_eq!(state.page, 0);
    }

    #[tokio::test]
    async fn run_fetch_hits_the_endpoint_for_the_collection() {
        let api = StubApi::default();
        api.push_page(Ok(sample_page(&[1], 0, true)));

        let mut controller =
            PollListController::new(PollCollection::UserVoted("carol".to_string()), PAGE_SIZE);
        let fetch = controller.reset();
        controller.run_fetch(&api, fetch).await;

        let calls = api.page_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("voted", "carol".to_string(), 0, PAGE_SIZE));
        assert_eq!(controller.state().polls.len(), 1);
    }

    #[tokio::test]
    async fn run_fetch_swallows_errors() {
        let api = StubApi::default();
        api.push_page(Err(ApiError::Server {
            status: 500,
            message: "boom".to_string(),
        }));

        let mut controller = PollListController::new(PollCollection::All, PAGE_SIZE);
        let fetch = controller.reset();
        controller.run_fetch(&api, fetch).await;
        assert!(!controller.state().is_loading);
        assert!(controller.state().polls.is_empty());
    }

    #[test]
    fn vote_selection_is_local_only() {
        let mut controller = loaded_controller(&[1, 2], true);
        controller.record_vote_selection(1, 21);
        assert_eq!(controller.state().current_votes, vec![None, Some(21)]);
        // Out of range selection is ignored.
        controller.record_vote_selection(9, 99);
        assert_eq!(controller.state().current_votes.len(), 2);
    }

    #[tokio::test]
    async fn unauthenticated_vote_redirects_without_a_network_call() {
        let api = StubApi::default();
        let tokens = temp_tokens(false);
        let mut controller = loaded_controller(&[1], true);
        controller.record_vote_selection(0, 11);

        assert_eq!(
            controller.submit_vote(0, &api, &tokens).await,
            VoteOutcome::LoginRequired(Notice::Info(LOGIN_TO_VOTE_MSG.to_string()))
        );
    }

    #[tokio::test]
    async fn vote_without_a_selection_is_refused() {
        let api = StubApi::default();
        let tokens = temp_tokens(true);
        let mut controller = loaded_controller(&[1], true);

        assert_eq!(
            controller.submit_vote(0, &api, &tokens).await,
            VoteOutcome::NoSelection
        );
        tokens.clear().unwrap();
    }

    #[tokio::test]
    async fn successful_vote_replaces_the_record_wholesale() {
        let api = StubApi::default();
        let mut updated = sample_poll(1);
        updated.total_votes = 41;
        updated.choices[0].vote_count = 41;
        updated.selected_choice = Some(11);
        api.vote_results.lock().unwrap().push_back(Ok(updated.clone()));

        let tokens = temp_tokens(true);
        let mut controller = loaded_controller(&[1, 2], true);
        controller.record_vote_selection(0, 11);

        assert_eq!(
            controller.submit_vote(0, &api, &tokens).await,
            VoteOutcome::Voted
        );
        assert_eq!(controller.state().polls[0], updated);
        // The pending selection is untouched by the response.
        assert_eq!(controller.state().current_votes[0], Some(11));
        tokens.clear().unwrap();
    }

    #[tokio::test]
    async fn vote_rejected_with_401_forces_logout() {
        let api = StubApi::default();
        api.vote_results
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Unauthorized {
                message: "expired".to_string(),
            }));

        let tokens = temp_tokens(true);
        let mut controller = loaded_controller(&[1], true);
        controller.record_vote_selection(0, 11);

        assert_eq!(
            controller.submit_vote(0, &api, &tokens).await,
            VoteOutcome::SessionExpired(Notice::Error(VOTE_SESSION_EXPIRED_MSG.to_string()))
        );
        assert!(!tokens.is_authenticated());
    }

    #[tokio::test]
    async fn vote_failure_surfaces_a_notification() {
        let api = StubApi::default();
        api.vote_results
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Server {
                status: 400,
                message: "Sorry! This Poll has already expired".to_string(),
            }));

        let tokens = temp_tokens(true);
        let mut controller = loaded_controller(&[1], true);
        controller.record_vote_selection(0, 11);

        assert_eq!(
            controller.submit_vote(0, &api, &tokens).await,
            VoteOutcome::Failed(Notice::Error(
                "Sorry! This Poll has already expired".to_string()
            ))
        );
        tokens.clear().unwrap();
    }

    #[tokio::test]
    async fn remove_splices_poll_and_vote_slot_together() {
        let api = StubApi::default();
        api.delete_results
            .lock()
            .unwrap()
            .push_back(Ok(crate::models::poll_api_model::ApiMessage {
                success: true,
                message: "Poll deleted".to_string(),
            }));

        let tokens = temp_tokens(true);
        let mut controller = loaded_controller(&[1, 2, 3], true);
        controller.record_vote_selection(1, 21);
        controller.record_vote_selection(2, 31);

        assert_eq!(
            controller.remove_poll(1, &api, &tokens).await,
            RemoveOutcome::Removed
        );
        let state = controller.state();
        assert_eq!(
            state.polls.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        // Poll 3 keeps its pending selection at the shifted index.
        assert_eq!(state.current_votes, vec![None, Some(31)]);
        tokens.clear().unwrap();
    }

    #[tokio::test]
    async fn unauthenticated_remove_redirects() {
        let api = StubApi::default();
        let tokens = temp_tokens(false);
        let mut controller = loaded_controller(&[1], true);

        assert_eq!(
            controller.remove_poll(0, &api, &tokens).await,
            RemoveOutcome::LoginRequired
        );
    }
}
