//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod admit_signal;

pub use admit_signal::{AdmissionOptions, AdmissionPorts, AdmitSignalUseCase};
