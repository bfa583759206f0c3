//! Domain stores.
//!
//! Four independent stores, each following the same pattern: restore from
//! the persisted snapshot (or seed), mutate in memory under a mutex, and
//! rewrite the whole serialized state after every mutation. Cross-store
//! references (team/project/assignee ids) are conceptual only: nothing
//! here checks them, and deletions never cascade.

mod projects;
mod seed;
mod tasks;
mod teams;
mod users;

pub use projects::{ProjectStore, ProjectsState};
pub use tasks::{TaskStore, TasksState};
pub use teams::{TeamStore, TeamsState};
pub use users::{AuthState, UserStore};
