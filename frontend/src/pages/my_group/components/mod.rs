pub mod confirmation;
pub mod current;
pub mod picker;
