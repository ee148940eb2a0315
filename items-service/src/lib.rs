//! Items Service - read-only item API over PostgreSQL.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
