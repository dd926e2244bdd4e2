//! Token sources and the function references they carry

mod function;
mod source;

pub use function::{FunctionArg, FunctionCall};
pub use source::{Namespace, TokenError, TokenSource};
