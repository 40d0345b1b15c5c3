//! State stores for the Meili Admin dashboard.
//!
//! Two in-memory mirrors sit between the UI and the API client:
//!
//! - [`ProjectStore`] -- the project list and the open project
//! - [`IndexStore`] -- the open project's indexes, the open index, its settings
//!
//! Each store keeps its state behind an async `RwLock` that is never held
//! across a network call, and publishes a [`StoreEvent`] after every change.
//! Stores reach the backend through [`ProjectSource`] and [`IndexSource`],
//! both implemented by [`meili_admin_client::AdminClient`].

pub mod events;
pub mod index;
pub mod project;
pub mod source;

pub use events::{EVENT_CAPACITY, StoreEvent, StoreKind};
pub use index::{IndexState, IndexStore};
pub use project::{ProjectState, ProjectStore};
pub use source::{ApiResult, IndexSource, ProjectSource};
