pub mod form;
pub mod list;
pub mod qr_modal;
