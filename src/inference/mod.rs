//! Model inference module.
//!
//! This module declares the engine capability traits the session is
//! written against, plus the FFI bindings and safe wrappers for the
//! C++ micro-runtime bridge (feature `runtime`).

mod engine;
#[cfg(feature = "runtime")]
mod ffi;
#[cfg(feature = "runtime")]
mod micro;

pub use engine::{Engine, Interpreter};
#[cfg(feature = "runtime")]
pub use micro::{MicroEngine, MicroInterpreter};
