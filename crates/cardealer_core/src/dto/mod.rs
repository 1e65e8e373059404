//! Client-facing transfer shapes.
//!
//! # Responsibility
//! - Define the wire representation consumed by controller layers.
//! - Own explicit, field-by-field conversion to and from entities.

pub mod vehicle_dto;
