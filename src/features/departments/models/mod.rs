mod department;
mod staff;

pub use department::{CreateDepartment, Department};
pub use staff::{CreateStaff, Staff};
