//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod pipeline;
pub mod response;
pub mod settings;
pub mod viewer;

pub use pipeline::*;
pub use response::*;
pub use settings::*;
pub use viewer::*;
