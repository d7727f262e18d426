//! Domain layer: entities, value types and repository interfaces.
//!
//! Nothing in this layer depends on the database or on HTTP.
//!
//! - [`entities`] - Orders and their status vocabulary
//! - [`pagination`] - Validated page requests and page counters
//! - [`stats`] - Sales figures derived from one aggregation snapshot
//! - [`repositories`] - Data access traits implemented by the infrastructure layer

pub mod entities;
pub mod pagination;
pub mod repositories;
pub mod stats;
