pub mod files;
pub mod history;
pub mod kv;

pub use files::{atomic_write, config_file, ensure_data_dir, init_local_data_dir, log_file, read_file};
pub use history::DailyHistoryStore;
pub use kv::{FileStore, KeyValueStore};

#[cfg(test)]
pub use history::{decode_log, HISTORY_KEY};
#[cfg(test)]
pub use kv::testing::MemoryStore;
