//! Recipe aggregate model.
//!
//! # Responsibility
//! - Define the recipe aggregate root and the child entities it owns.
//! - Enforce structural invariants (positive quantities, single owner).
//!
//! # Invariants
//! - Children are attached and detached only through `Recipe` operations.
//! - Every attached child's owner equals the key of the recipe holding it.
//! - Persisted identity is assigned by a store, never by callers.

pub mod ingredient;
pub mod keys;
pub mod nutrition;
pub mod recipe;
pub mod step;
pub mod validation;
pub mod value;
