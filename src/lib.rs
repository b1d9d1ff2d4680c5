//! Library exports for the link shortener application
//!
//! This module exposes internal components for testing and potential library usage.

pub mod error;
pub mod handler;
pub mod id;
pub mod model;
pub mod registry;
pub mod route;
pub mod session;
pub mod store;
pub mod users;
