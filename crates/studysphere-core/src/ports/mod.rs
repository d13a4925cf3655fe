//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IIdentityProvider`] - Credential verification and account management
//!   (Firebase Authentication, future providers)
//! - [`INotificationService`] - Transient user feedback and busy indicator

pub mod identity_provider;
pub mod notification;

pub use identity_provider::{AuthUser, IIdentityProvider};
pub use notification::{INotificationService, Notification, NotificationPriority};
