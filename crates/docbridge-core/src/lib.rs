#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod encoding;
pub mod error;
pub mod traits;
pub mod types;
