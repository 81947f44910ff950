mod errors;

pub use errors::Error;

pub type OsirisResult<T> = Result<T, Error>;
