pub mod application;
pub mod config;
pub mod error;
pub mod http;
pub mod jinrishici;
pub mod logging;
pub mod message;
pub mod retry;
pub mod runtime;
pub mod webhook;
