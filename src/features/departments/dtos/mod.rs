mod department_dto;
mod staff_dto;

pub use department_dto::*;
pub use staff_dto::*;
