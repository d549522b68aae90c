//! Entity repositories: the remote service is authoritative, the local
//! store keeps a cache (roster) or a backup (submitted hours).

pub mod employees;
pub mod hours;

pub use employees::{EmployeeRepository, RemoteEmployeeRepository};
pub use hours::{HoursRepository, RemoteHoursRepository};
