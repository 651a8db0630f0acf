// src/handlers/mod.rs
pub mod error;
pub mod health;
pub mod marketing_card;
