use anyhow::Result;
use polling_app_client::api::ApiClient;
use polling_app_client::auth::token_store::TokenStore;
use polling_app_client::config::app_config::AppConfig;
use polling_app_client::list::poll_list::{PollCollection, PollListController};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let config = AppConfig::init();
    let tokens = TokenStore::init(&config.access_token_path);
    let api = ApiClient::init(&config.api_base_url, tokens);

    let mut list = PollListController::new(PollCollection::All, config.poll_list_size);
    let fetch = list.reset();
    list.run_fetch(&api, fetch).await;

    let state = list.state();
    println!("{} polls on the first page:", state.polls.len());
    for poll in &state.polls {
        println!(
            "  [{}] {} ({} votes, by @{})",
            poll.id, poll.question, poll.total_votes, poll.created_by.username
        );
    }
    Ok(())
}
