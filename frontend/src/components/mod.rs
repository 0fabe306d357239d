pub mod common;
pub mod confirm_dialog;
pub mod empty_state;
pub mod error;
pub mod guard;
pub mod install_prompt;
pub mod layout;
pub mod modal;
