pub mod poll_api_model;
