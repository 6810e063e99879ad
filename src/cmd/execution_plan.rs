use crate::{
    builtins::BuiltinCommands,
    config::Limits,
    fileops::FileRequest,
    parse::{
        chain::{parse_chain, Chain, ChainKind, Segment},
        redirect::{parse_redirection, RedirectMode, Redirection},
        token::{Token, TokenKind},
        ParseError,
    },
};

use super::CommandError;

/// Redirections are checked in this order, so `>>` wins over `>`.
const REDIRECT_PRECEDENCE: [RedirectMode; 3] =
    [RedirectMode::Append, RedirectMode::Output, RedirectMode::Input];

const CHAIN_PRECEDENCE: [ChainKind; 4] = [
    ChainKind::Conditional,
    ChainKind::ReversePipe,
    ChainKind::Pipe,
    ChainKind::Sequential,
];

/// What one input line will do. Exactly one composition applies per line.
#[derive(Debug)]
pub enum ExecutionPlan<'a> {
    Builtin(BuiltinCommands),
    File(FileRequest<'a>),
    Redirect(Redirection<'a>),
    Conditional(Chain<'a>),
    ReversePipe(Chain<'a>),
    Pipe(Chain<'a>),
    Sequential(Chain<'a>),
    Simple {
        segment: Segment<'a>,
        background: bool,
    },
    NoOp,
}

impl<'a> ExecutionPlan<'a> {
    /// Picks the first matching category: builtins, file operators,
    /// redirections, conditional, reverse pipe, pipe, sequence, then a plain
    /// command with an optional trailing `&`.
    pub fn classify(tokens: &[Token<'a>], limits: &Limits) -> Result<Self, CommandError> {
        let Some(first) = tokens.first() else {
            return Ok(Self::NoOp);
        };

        if let Some(builtin) = BuiltinCommands::from_name(first.text) {
            if tokens.len() != 1 {
                return Err(ParseError::BuiltinArity.into());
            }
            return Ok(Self::Builtin(builtin));
        }

        if FileRequest::matches(tokens) {
            return Ok(Self::File(FileRequest::parse(tokens, limits)?));
        }

        if let Some(mode) = REDIRECT_PRECEDENCE
            .into_iter()
            .find(|mode| tokens.iter().any(|t| t.is(mode.token())))
        {
            return Ok(Self::Redirect(parse_redirection(tokens, mode, limits)?));
        }

        if let Some(kind) = CHAIN_PRECEDENCE
            .into_iter()
            .find(|kind| tokens.iter().any(|t| kind.delimits(t.kind)))
        {
            let chain = parse_chain(tokens, kind, limits)?;
            return Ok(match kind {
                ChainKind::Conditional => Self::Conditional(chain),
                ChainKind::ReversePipe => Self::ReversePipe(chain),
                ChainKind::Pipe => Self::Pipe(chain),
                ChainKind::Sequential => Self::Sequential(chain),
            });
        }

        let (words, background) = match tokens.split_last() {
            Some((last, rest)) if last.is(TokenKind::Background) => (rest, true),
            _ => (tokens, false),
        };

        let max = limits.max_segment_args;
        let segment = Segment::from_tokens(words, max).ok_or(ParseError::CommandSize { max })?;

        Ok(Self::Simple {
            segment,
            background,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fileops::FileOpError, parse::token::tokenize};

    fn classify(line: &str) -> Result<ExecutionPlan<'_>, CommandError> {
        let tokens = tokenize(line).unwrap();
        ExecutionPlan::classify(&tokens, &Limits::default())
    }

    #[test]
    fn blank_line_is_noop() {
        assert!(matches!(classify("   ").unwrap(), ExecutionPlan::NoOp));
    }

    #[test]
    fn builtins_need_exactly_one_token() {
        assert!(matches!(
            classify("numbg").unwrap(),
            ExecutionPlan::Builtin(BuiltinCommands::NumBg(_))
        ));
        let err = classify("exit now").unwrap_err();
        assert_eq!(err.to_string(), "Few/many arguments received");
    }

    #[test]
    fn file_operators_come_before_redirection() {
        let ExecutionPlan::File(request) = classify("a + b > c").unwrap() else {
            panic!("expected file operator");
        };
        assert_eq!(request, FileRequest::Concat(vec!["a", "b", ">", "c"]));

        assert!(matches!(classify("# notes").unwrap(), ExecutionPlan::File(_)));
        assert!(matches!(
            classify("a +").unwrap_err(),
            CommandError::File(FileOpError::TooFewFiles)
        ));
    }

    #[test]
    fn append_wins_over_truncate_and_pipes() {
        let plan = classify("ls | sort >> out > other").unwrap();
        let ExecutionPlan::Redirect(redirect) = plan else {
            panic!("expected redirect, got {plan:?}");
        };
        assert_eq!(redirect.mode, RedirectMode::Append);
        assert_eq!(redirect.command.words(), ["ls", "|", "sort"]);
        assert_eq!(redirect.target, "out");
    }

    #[test]
    fn chain_precedence() {
        assert!(matches!(
            classify("a | b && c ; d").unwrap(),
            ExecutionPlan::Conditional(_)
        ));
        assert!(matches!(
            classify("a | b ~ c ; d").unwrap(),
            ExecutionPlan::ReversePipe(_)
        ));
        assert!(matches!(classify("a | b ; c").unwrap(), ExecutionPlan::Pipe(_)));
        assert!(matches!(classify("a ; b").unwrap(), ExecutionPlan::Sequential(_)));
    }

    #[test]
    fn trailing_ampersand_backgrounds() {
        let ExecutionPlan::Simple {
            segment,
            background,
        } = classify("sleep 10 &").unwrap()
        else {
            panic!("expected simple command");
        };
        assert!(background);
        assert_eq!(segment.words(), ["sleep", "10"]);

        let ExecutionPlan::Simple { background, .. } = classify("echo a & b").unwrap() else {
            panic!("expected simple command");
        };
        assert!(!background);
    }

    #[test]
    fn lone_ampersand_is_rejected() {
        let err = classify("&").unwrap_err();
        assert_eq!(err.to_string(), "Command argc must be between 1 and 5");
    }

    #[test]
    fn over_limit_chain_is_rejected_whole() {
        let err = classify("a | b | c | d | e | f").unwrap_err();
        assert_eq!(err.to_string(), "Maximum 4 piping operations allowed");
    }
}
