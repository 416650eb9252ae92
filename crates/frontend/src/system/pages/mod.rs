pub mod config_error;
pub mod login;
