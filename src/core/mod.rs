pub mod fs;
pub mod naming;
