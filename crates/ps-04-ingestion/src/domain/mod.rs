//! # Domain Layer

pub mod admission;
pub mod config;
pub mod wire;
