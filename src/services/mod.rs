//! Service layer: the employee service facade.

mod employee_service;

pub use employee_service::EmployeeService;
