//! Library exports for the link shortener bot
//!
//! This module exposes internal components for testing and potential library usage.

pub mod database;
pub mod error;
pub mod handler;
pub mod id;
pub mod middleware;
pub mod model;
pub mod route;
pub mod store;
pub mod telegram;
