// file: src/database/mod.rs
// description: table store access module exports
// reference: internal module structure

pub mod client;
pub mod insert;
pub mod memory;
pub mod schema;
pub mod store;

pub use client::SupabaseClient;
pub use insert::{BatchInserter, InsertStats};
pub use memory::MemoryStore;
pub use store::TableStore;
