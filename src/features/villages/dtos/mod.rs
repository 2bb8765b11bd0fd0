pub mod village_dto;

pub use village_dto::*;
