//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Insert DTOs and read projections used by the repository layer

pub mod job;
pub mod status;
