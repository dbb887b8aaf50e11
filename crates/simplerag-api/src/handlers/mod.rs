//! HTTP request handlers

pub mod chat;
pub mod health;
pub mod upload;
