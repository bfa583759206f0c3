//! Data models for the project management admin console.
//!
//! These models match the frontend payload shapes exactly for seamless
//! interoperability (camelCase wire names, snake_case enum values).

mod project;
mod task;
mod team;
mod user;

pub use project::*;
pub use task::*;
pub use team::*;
pub use user::*;
