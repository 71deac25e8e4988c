//! Backend for the biodata studio: domain services, storage, and the REST
//! interface layer. The binary in `main.rs` wires these together into an
//! axum server.

pub mod domain;
pub mod rest;
pub mod storage;
