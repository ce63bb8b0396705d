//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for use case inputs/outputs.

mod admission_dto;

pub use admission_dto::{AdmissionDecision, AdmissionRequest};
