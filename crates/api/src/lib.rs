//! HTTP surface for the Herald notification subsystem.
//!
//! Exposes the notices UI glue: listing, unseen counts, seen/archive
//! transitions, and per-type delivery settings. Identity arrives as an
//! `x-user-id` header set by the enclosing application's gateway; this
//! subsystem never sees credentials.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
