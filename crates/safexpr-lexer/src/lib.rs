//! safexpr lexer: converts expression source text into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{normalize, Lexer};
pub use token::{Token, TokenKind};
