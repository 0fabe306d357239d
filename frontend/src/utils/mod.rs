pub mod download;
pub mod qr;
pub mod storage;
pub mod time;
pub mod version;
