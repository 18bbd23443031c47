//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own panel data and the document pipeline so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod auth;
pub mod conversation;
pub mod dashboard;
pub mod document;
pub mod notify;
pub mod processing;
pub mod security;
pub mod setup;
