//! Domain layer: persisted entities and request/response DTOs.

pub mod dto;
pub mod entities;
