use logos::Logos;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default, Error)]
pub enum LexerError {
    #[default]
    #[error("unknown token")]
    UnknownToken,
}

/// Operators are only recognized as whole whitespace-delimited tokens, so
/// `a|b` lexes as a single [`TokenKind::Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\n\f]+", error = LexerError)]
pub enum TokenKind {
    #[token("|")]
    Pipe,
    #[token("~")]
    ReversePipe,
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[token(";")]
    Semi,
    #[token("<")]
    Read,
    #[token(">")]
    Write,
    #[token(">>")]
    Append,
    #[token("+")]
    Concat,
    #[token("++")]
    MutualAppend,
    #[token("#")]
    WordCount,
    #[token("&")]
    Background,

    #[regex(r"[^ \t\r\n\f]+")]
    Word,
}

impl TokenKind {
    pub fn is_file_operator(self) -> bool {
        matches!(self, Self::Concat | Self::MutualAppend | Self::WordCount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, LexerError> {
    let mut lexer = TokenKind::lexer(line);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        tokens.push(Token {
            kind: kind?,
            text: lexer.slice(),
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<TokenKind> {
        tokenize(line).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn splits_on_whitespace() {
        let tokens = tokenize("  ls\t-l   /tmp \n").unwrap();
        let texts = tokens.iter().map(|t| t.text).collect::<Vec<_>>();
        assert_eq!(texts, ["ls", "-l", "/tmp"]);
        assert!(tokens.iter().all(|t| t.is(TokenKind::Word)));
    }

    #[test]
    fn recognizes_every_operator() {
        assert_eq!(
            kinds("| ~ && || ; < > >> + ++ # &"),
            [
                TokenKind::Pipe,
                TokenKind::ReversePipe,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Semi,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::Append,
                TokenKind::Concat,
                TokenKind::MutualAppend,
                TokenKind::WordCount,
                TokenKind::Background,
            ]
        );
    }

    #[test]
    fn glued_operators_are_words() {
        assert_eq!(kinds("a|b >out &&x"), [TokenKind::Word; 3]);
        assert_eq!(kinds("#notes"), [TokenKind::Word]);
    }

    #[test]
    fn blank_line_has_no_tokens() {
        assert!(tokenize("   \t ").unwrap().is_empty());
        assert!(tokenize("").unwrap().is_empty());
    }
}
