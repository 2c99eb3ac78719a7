//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Sign-up, sign-in, refresh and sign-out handlers.
pub mod auth;
/// Counselor booking handlers.
pub mod booking;
/// Counselor, event and resource listings.
pub mod catalog;
/// Wellness companion conversation handlers.
pub mod chat;
/// Role dashboard handlers.
pub mod dashboard;
/// Route guard lookup.
pub mod guard;
