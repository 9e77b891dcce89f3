//! Resource services: validation plus storage for each resource.

pub mod attendance;
pub mod employee;

pub use attendance::{AttendanceInput, AttendanceService};
pub use employee::{EmployeeInput, EmployeeService};
