// src/dtos/mod.rs
pub mod report;
