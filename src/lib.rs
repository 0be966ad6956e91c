#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

#[macro_use]
mod async_helpers;

//Application Imports/Exports
pub mod constants;
pub mod server;
pub mod workload;
