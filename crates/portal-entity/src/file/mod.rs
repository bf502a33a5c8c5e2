//! Client file domain entities.

pub mod model;

pub use model::{ClientFile, CreateClientFile};
