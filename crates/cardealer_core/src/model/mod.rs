//! Persistence-side domain model for the vehicle inventory.
//!
//! # Responsibility
//! - Define the entity shape stored by repositories.
//!
//! # Invariants
//! - Vehicle identity is assigned by persistence, never by callers.

pub mod vehicle;
