//! Data Transfer Objects for form decoding and health-check responses.

pub mod form_dto;
pub mod health_dto;

pub use form_dto::*;
pub use health_dto::*;
