//! Use cases (interactors) for StudySphere
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate business rules to domain methods and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`AuthenticateUseCase`] - Session gate, login/registration submission, logout

pub mod authenticate;

pub use authenticate::AuthenticateUseCase;
