use crate::config::Limits;

use super::{
    chain::Segment,
    token::{Token, TokenKind},
    ParseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `<`: the file becomes stdin.
    Input,
    /// `>`: stdout truncates the file.
    Output,
    /// `>>`: stdout appends to the file.
    Append,
}

impl RedirectMode {
    pub fn token(self) -> TokenKind {
        match self {
            Self::Input => TokenKind::Read,
            Self::Output => TokenKind::Write,
            Self::Append => TokenKind::Append,
        }
    }

    pub(crate) fn describe(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Append => "append",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection<'a> {
    pub mode: RedirectMode,
    pub command: Segment<'a>,
    pub target: &'a str,
}

/// Splits `cmd args... OP file` at the first `mode` operator. Tokens after the
/// file name are ignored.
pub fn parse_redirection<'a>(
    tokens: &[Token<'a>],
    mode: RedirectMode,
    limits: &Limits,
) -> Result<Redirection<'a>, ParseError> {
    let Some(pos) = tokens
        .iter()
        .position(|t| t.is(mode.token()))
        .filter(|pos| pos + 1 < tokens.len())
    else {
        return Err(ParseError::RedirectSyntax(mode));
    };

    let max = limits.max_segment_args;
    let command =
        Segment::from_tokens(&tokens[..pos], max).ok_or(ParseError::CommandSize { max })?;

    Ok(Redirection {
        mode,
        command,
        target: tokens[pos + 1].text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::token::tokenize;

    fn parse(line: &str, mode: RedirectMode) -> Result<Redirection<'_>, ParseError> {
        let tokens = tokenize(line).unwrap();
        parse_redirection(&tokens, mode, &Limits::default())
    }

    #[test]
    fn splits_command_and_target() {
        let redirect = parse("echo hi > out.txt", RedirectMode::Output).unwrap();
        assert_eq!(redirect.command.words(), ["echo", "hi"]);
        assert_eq!(redirect.target, "out.txt");
    }

    #[test]
    fn missing_filename() {
        let err = parse("echo hi >>", RedirectMode::Append).unwrap_err();
        assert_eq!(err, ParseError::RedirectSyntax(RedirectMode::Append));
        assert_eq!(err.to_string(), "Invalid append redirection syntax");
    }

    #[test]
    fn missing_command() {
        let err = parse("< in.txt", RedirectMode::Input).unwrap_err();
        assert_eq!(err.to_string(), "Command argc must be between 1 and 5");
    }

    #[test]
    fn command_too_long() {
        let err = parse("a b c d e f > out", RedirectMode::Output).unwrap_err();
        assert_eq!(err, ParseError::CommandSize { max: 5 });
    }
}
