pub mod config;
pub mod contact;
pub mod content;
pub mod i18n;
pub mod retry;
pub mod server;
