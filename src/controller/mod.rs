//! HTTP request handlers.

pub mod auth;
pub mod health;
pub mod webhook;

#[cfg(test)]
mod test;
