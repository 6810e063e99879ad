use thiserror::Error;

use self::{chain::ChainKind, redirect::RedirectMode, token::LexerError};

pub mod chain;
pub mod redirect;
pub mod token;

pub use self::token::tokenize;

/// Structural problems with a line. The line is abandoned before anything is
/// spawned; the message is what the user sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("failed to tokenize command: {0}")]
    Lexer(#[from] LexerError),
    #[error("Maximum {limit} {} allowed", .kind.ceiling_noun())]
    TooManyOperators { kind: ChainKind, limit: usize },
    #[error("{} argc must be between 1 and {max}", .kind.segment_noun())]
    SegmentSize { kind: ChainKind, max: usize },
    #[error("Command argc must be between 1 and {max}")]
    CommandSize { max: usize },
    #[error("Invalid {} redirection syntax", .0.describe())]
    RedirectSyntax(RedirectMode),
    #[error("Few/many arguments received")]
    BuiltinArity,
    #[error("argument contains a NUL byte: {0:?}")]
    NulByte(String),
}
