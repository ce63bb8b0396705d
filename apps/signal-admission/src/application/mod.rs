//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces to the stores the risk gate reads and writes
//! - **Use Cases**: Admission with per-user serialization
//! - **DTOs**: Requests and decisions exchanged with the signal pipeline

pub mod dto;
pub mod errors;
pub mod ports;
pub mod use_cases;

pub use dto::*;
pub use errors::AdmissionError;
pub use ports::*;
pub use use_cases::*;
