pub mod assign_modal;
pub mod bulk_form;
pub mod csv_upload;
pub mod import_result;
pub mod list;
