//! Core types for Tillpoint.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod permission;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use permission::{Permission, PermissionGroup, PermissionParseError, permission_groups};
pub use role::UserRole;
pub use status::UserStatus;
