pub mod login;
pub mod new_poll;
pub mod signup;
