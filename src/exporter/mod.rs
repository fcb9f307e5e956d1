// file: src/exporter/mod.rs
// description: artifact export module exports
// reference: internal module structure

pub mod summary;

pub use summary::SummaryWriter;
