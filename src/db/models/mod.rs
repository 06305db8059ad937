//! Database models, one module per table.

pub mod admin;
pub mod reservation;

pub use admin::*;
pub use reservation::*;
