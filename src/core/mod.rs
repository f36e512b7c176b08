//! Core application module
//!
//! This module contains:
//! - Application entry point and Cosmic Application implementation
//! - Host-side collaborators attached to the capture session

pub mod app;
pub mod host;
