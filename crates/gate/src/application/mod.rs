//! Application Layer
//!
//! The access gate and its decision type.

pub mod authorize;

pub use authorize::{AccessGate, AuthorizeRequest, GateDecision};
