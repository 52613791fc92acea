// src/services/mod.rs
pub mod aggregate;
pub mod console;
pub mod derive;
pub mod join;
pub mod pipeline;
pub mod sensitivity;
