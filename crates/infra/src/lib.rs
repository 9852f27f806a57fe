//! `backoffice-infra` — adapters for the external collaborator ports.
//!
//! In-memory implementations of the document store, blob store, and auth
//! provider, plus environment-driven configuration. The in-memory adapters
//! back the workspace's integration tests and the embedding application's
//! test harnesses; production adapters for the real services live with the
//! embedding application.

pub mod auth_provider;
pub mod blob_store;
pub mod config;
pub mod document_store;


pub use auth_provider::InMemoryAuthProvider;
pub use blob_store::InMemoryBlobStore;
pub use config::{Config, ConfigError};
pub use document_store::InMemoryDocumentStore;
