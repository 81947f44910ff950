pub mod common;
pub mod rename;
