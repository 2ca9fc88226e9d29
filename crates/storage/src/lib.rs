#![forbid(unsafe_code)]

mod entry;
pub mod reaper;
mod store;

pub use entry::{Entry, Value};
pub use reaper::{find_cutoff, reap, reap_at};
pub use store::Store;
