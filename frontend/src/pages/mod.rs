pub mod admin_groups;
pub mod admin_sessions;
pub mod admin_users;
pub mod jardin;
pub mod login;
pub mod my_group;
pub mod scanner;
