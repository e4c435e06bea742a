//! Recipe computations and use-case services.
//!
//! # Responsibility
//! - Hold every business rule over the recipe aggregate (`computations`).
//! - Orchestrate lookups and "compute then persist" flows over a store.
//!
//! # Invariants
//! - Computations never perform I/O.
//! - Services never bypass the store contract.

pub mod computations;
pub mod recipe_service;
