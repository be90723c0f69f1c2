//! Repository layer: the async store behind every screen.
//!
//! The repository is a collaborator of the core rather than part of it. It
//! exposes list/create/update operations over the five entity kinds; each call
//! incurs a fixed simulated delay. There is no persistence.
//!
//! # Modules
//!
//! - `backend`: The [`GroopRepository`] trait
//! - `memory`: In-memory implementation with simulated latency
//! - `seed`: Built-in seed data and its JSON representation

pub mod backend;
pub mod memory;
pub mod seed;

pub use backend::GroopRepository;
pub use memory::InMemoryGroopRepository;
pub use seed::SeedData;
