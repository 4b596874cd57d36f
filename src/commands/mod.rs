//! Commands
//!
//! Entry points a front end calls. Each returns a `CommandResponse` envelope;
//! the outer `Err` is reserved for failures of the command plumbing itself.

pub mod health;
pub mod pipeline;
pub mod settings;
pub mod viewer;

pub use health::*;
pub use pipeline::*;
pub use settings::*;
pub use viewer::*;
