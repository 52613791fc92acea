// src/handlers/mod.rs
pub mod report;
