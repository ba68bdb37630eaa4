pub mod admin;
pub mod clear;
pub mod config;
pub mod export;
pub mod init;
pub mod kiosk;
pub mod list;
pub mod log;
pub mod ring;
pub mod shift;
pub mod tone;
