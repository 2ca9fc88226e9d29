#![forbid(unsafe_code)]

mod error;

pub use error::*;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_REAP_INTERVAL_SECS: u64 = 10;
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024; // 8 MB
