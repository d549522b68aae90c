pub mod config;
pub mod consult;
pub mod employees;
pub mod history;
pub mod init;
pub mod log;
pub mod prompt;
pub mod register;
pub mod report;
pub mod session;
