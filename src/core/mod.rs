pub mod config;
pub mod confirmation;
pub mod log;
pub mod report;
pub mod route_gate;
pub mod session;
pub mod views;
pub mod wizard;
