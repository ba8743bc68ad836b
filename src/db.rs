// src/db.rs

pub mod class_repo;
pub mod directory_repo;
pub mod event_repo;
pub mod memory;
pub mod payment_repo;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{ClassRepository, DirectoryRepository, EventRepository, PaymentRepository, Store};
