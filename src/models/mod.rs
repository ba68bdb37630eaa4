pub mod field;
pub mod filter;
pub mod key;
pub mod ring_event;
pub mod shift;
