//! Domain entities and business logic
//!
//! This module contains the core domain types for StudySphere:
//! - Newtypes for type-safe identifiers and validated domain types
//! - Session and flow-state types
//! - Transient credential types with ordered validation
//! - Domain-specific error types

pub mod credentials;
pub mod errors;
pub mod newtypes;
pub mod session;

// Re-export commonly used types
pub use credentials::{CredentialField, Credentials, RegistrationRequest, MIN_PASSWORD_LENGTH};
pub use errors::{AuthError, DomainError};
pub use newtypes::{Email, UserId};
pub use session::{FlowState, Session, UserProfile};
