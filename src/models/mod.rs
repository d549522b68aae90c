pub mod catalog;
pub mod draft;
pub mod employee;
pub mod hours;
pub mod user;
