//! Auth module: three-layer architecture (domain, stores, service).
//!
//! This module centralizes registration, login, password reset and token
//! rotation under the service crate, decoupled from the HTTP layer.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod tokens;

pub use service::AuthService;
