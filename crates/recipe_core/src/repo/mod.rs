//! Repository layer: the recipe store contract and its implementations.
//!
//! # Responsibility
//! - Define the persistence contract consumed by services.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Saving assigns recipe and child identities; the aggregate never does.
//! - Lookups by identity report absence as `None`, not as an error.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod memory_repo;
pub mod recipe_repo;
