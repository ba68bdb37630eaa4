pub mod auth;
pub mod backup;
pub mod controller;
pub mod keyboard;
pub mod log;
pub mod photo;
pub mod session;
pub mod shift;
pub mod tone;
