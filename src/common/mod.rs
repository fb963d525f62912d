//! `enum`s and `struct`s used by the driver.



mod command;
mod config;
mod register;
mod snapshot;



pub use command::*;
pub use config::*;
pub use register::*;
pub use snapshot::*;
