//! Service implementations
//!
//! Concrete adapters behind the boundary traits: where charts are loaded
//! from and saved to, and where occupant candidates come from.

pub mod contact_directory;
pub mod file_repository;
pub mod memory_repository;
pub mod remote_repository;

#[cfg(test)]
mod tests;

pub use contact_directory::{RemoteContactDirectory, StaticContactDirectory};
pub use file_repository::FileRepository;
pub use memory_repository::InMemoryRepository;
pub use remote_repository::RemoteRepository;
