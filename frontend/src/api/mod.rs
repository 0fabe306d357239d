mod attendance;
mod auth;
pub mod client;
mod groups;
mod sessions;
pub mod types;
mod users;

pub use client::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
