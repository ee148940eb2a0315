//! Hello Service - static greeting and clock API.

pub mod config;
pub mod handlers;
pub mod startup;
