pub mod form;
pub mod list;
pub mod members_modal;
