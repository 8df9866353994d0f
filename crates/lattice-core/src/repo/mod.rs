pub mod memory;
pub mod types;

pub use memory::InMemoryLatticeStore;
pub use types::{StorageRecordRepository, SummaryRepository};
