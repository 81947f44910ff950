pub mod builder;
pub mod parser;
pub mod template;
pub mod types;
pub mod validator;

pub use builder::*;
pub use parser::*;
pub use template::*;
pub use types::*;
pub use validator::*;
