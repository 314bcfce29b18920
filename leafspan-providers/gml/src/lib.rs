//! GML provider for graphs written as `graph [ node [...] edge [...] ]`.

mod errors;
mod lexer;
mod parse;
mod provider;

pub use errors::GmlError;
pub use provider::GmlProvider;
