// src/dse/mod.rs
pub mod client;
pub mod models;
