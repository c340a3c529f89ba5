pub mod capture;
pub mod impl_monitor;

mod utils;
