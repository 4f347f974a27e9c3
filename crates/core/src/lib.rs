//! Domain logic shared by the relay crates: filename validation, filename
//! synthesis, script-directory access and the error taxonomy.

pub mod error;
pub mod naming;
pub mod path_guard;
pub mod storage;
pub mod types;
