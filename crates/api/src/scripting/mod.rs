//! Script orchestration service.
//!
//! The [`ScriptOrchestrator`](orchestrator::ScriptOrchestrator) ties the
//! path guard, script storage and engine client together behind the relay's
//! operations.

pub mod orchestrator;
