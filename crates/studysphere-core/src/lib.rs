//! StudySphere Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Session`, `Credentials`, `RegistrationRequest`, `FlowState`
//! - **Use cases** - `AuthenticateUseCase` (session gate, credential submission, logout)
//! - **Port definitions** - Traits for adapters: `IIdentityProvider`, `INotificationService`
//! - **State machine** - The two-state session gate plus the pending submission flow
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
