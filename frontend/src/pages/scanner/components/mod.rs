pub mod pin_modal;
pub mod result;
