mod department_service;
mod staff_service;

pub use department_service::DepartmentService;
pub use staff_service::StaffService;
