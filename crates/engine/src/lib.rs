//! Client for the remote code generation/execution engine.

pub mod client;

pub use client::{EngineClient, EngineError, EngineTimeouts, GenerateResponse};
