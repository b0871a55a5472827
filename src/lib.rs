#[macro_use]
extern crate tracing;

pub mod animation;
pub mod cli;
pub mod replay;
pub mod utils;
pub mod wrapper;
