pub mod logging;
pub mod manifest;
pub mod process;
pub mod repo;
pub mod tools;
