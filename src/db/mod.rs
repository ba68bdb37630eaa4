pub mod cache;
pub mod csv_store;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod ring_log;
pub mod sqlite_store;
pub mod store;

pub use ring_log::RingEventLog;
pub use store::{LogStore, StoreStamp};
