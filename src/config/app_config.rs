use dotenv::dotenv;
use log::error;
use std::env;

pub const DEFAULT_POLL_LIST_SIZE: u32 = 30;

pub struct AppConfig {
    pub api_base_url: String,
    pub poll_list_size: u32,
    pub access_token_path: String,
}

impl AppConfig {
    pub fn init() -> Self {
        dotenv().ok();
        let api_base_url = env::var("API_BASE_URL").unwrap_or_else(|_| {
            error!("api_base_url var not found!");
            String::from("http://localhost:5000/api/v1")
        });
        let poll_list_size = env::var("POLL_LIST_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| {
                error!("poll_list_size var not set, using default");
                DEFAULT_POLL_LIST_SIZE
            });
        let access_token_path = env::var("ACCESS_TOKEN_PATH").unwrap_or_else(|_| {
            error!("access_token_path var not found!");
            String::from(".polling-app-token")
        });
        Self {
            api_base_url,
            poll_list_size,
            access_token_path,
        }
    }
}
