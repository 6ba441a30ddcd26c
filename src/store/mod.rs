pub mod base;
pub mod file_storage;
pub mod memory_storage;
pub mod session_store;

pub use base::*;
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use session_store::SessionStore;
