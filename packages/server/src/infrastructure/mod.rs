//! Infrastructure layer.
//!
//! Concrete implementations of the traits defined by the domain layer,
//! plus the wire DTOs.

pub mod broadcaster;
pub mod connection_registry;
pub mod dto;
pub mod repository;
