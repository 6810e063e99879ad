use std::fmt;

use itertools::Itertools;
use strum::EnumIter;

use crate::config::Limits;

use super::{
    token::{Token, TokenKind},
    ParseError,
};

/// One external-command invocation: program name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    words: Vec<&'a str>,
}

impl<'a> Segment<'a> {
    /// Returns `None` unless `1 <= tokens.len() <= max_args`.
    pub fn from_tokens(tokens: &[Token<'a>], max_args: usize) -> Option<Self> {
        if tokens.is_empty() || tokens.len() > max_args {
            return None;
        }

        Some(Self {
            words: tokens.iter().map(|t| t.text).collect(),
        })
    }

    pub fn program(&self) -> &'a str {
        self.words[0]
    }

    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.iter().join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ChainKind {
    Pipe,
    ReversePipe,
    Sequential,
    Conditional,
}

impl ChainKind {
    pub fn delimits(self, kind: TokenKind) -> bool {
        match self {
            Self::Pipe => kind == TokenKind::Pipe,
            Self::ReversePipe => kind == TokenKind::ReversePipe,
            Self::Sequential => kind == TokenKind::Semi,
            Self::Conditional => matches!(kind, TokenKind::And | TokenKind::Or),
        }
    }

    pub(crate) fn ceiling_noun(self) -> &'static str {
        match self {
            Self::Pipe => "piping operations",
            Self::ReversePipe => "reverse piping operations",
            Self::Sequential => "sequential commands",
            Self::Conditional => "conditional operators",
        }
    }

    pub(crate) fn segment_noun(self) -> &'static str {
        match self {
            Self::Pipe => "Each piped command",
            Self::ReversePipe => "Each reverse piped command",
            Self::Sequential => "Each command",
            Self::Conditional => "Each conditional command",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Continue only if the previous command succeeded.
    And,
    /// Continue only if the previous command failed.
    Or,
}

impl Connector {
    fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::And => Some(Self::And),
            TokenKind::Or => Some(Self::Or),
            _ => None,
        }
    }

    pub fn proceeds_after(self, succeeded: bool) -> bool {
        match self {
            Self::And => succeeded,
            Self::Or => !succeeded,
        }
    }
}

/// Segments joined by a single operator kind. For conditional chains
/// `connectors[i]` sits between `segments[i]` and `segments[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain<'a> {
    pub kind: ChainKind,
    pub segments: Vec<Segment<'a>>,
    pub connectors: Vec<Connector>,
}

impl<'a> Chain<'a> {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

pub fn parse_chain<'a>(
    tokens: &[Token<'a>],
    kind: ChainKind,
    limits: &Limits,
) -> Result<Chain<'a>, ParseError> {
    let limit = limits.operator_ceiling(kind);
    let operators = tokens.iter().filter(|t| kind.delimits(t.kind)).count();

    if operators > limit {
        return Err(ParseError::TooManyOperators { kind, limit });
    }

    let max = limits.max_segment_args;
    let segments = tokens
        .split(|t| kind.delimits(t.kind))
        .map(|group| {
            Segment::from_tokens(group, max).ok_or(ParseError::SegmentSize { kind, max })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let connectors = if kind == ChainKind::Conditional {
        tokens
            .iter()
            .filter_map(|t| Connector::from_kind(t.kind))
            .collect()
    } else {
        Vec::new()
    };

    trace!(?kind, segments = segments.len(), "parsed chain");

    Ok(Chain {
        kind,
        segments,
        connectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::token::tokenize;

    fn parse(line: &str, kind: ChainKind) -> Result<Chain<'_>, ParseError> {
        let tokens = tokenize(line).unwrap();
        parse_chain(&tokens, kind, &Limits::default())
    }

    #[test]
    fn splits_pipeline_into_segments() {
        let chain = parse("ls -l | grep rs | wc -l", ChainKind::Pipe).unwrap();
        let rendered = chain
            .segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(rendered, ["ls -l", "grep rs", "wc -l"]);
        assert!(chain.connectors.is_empty());
    }

    #[test]
    fn rejects_too_many_pipes() {
        let err = parse("a | b | c | d | e | f", ChainKind::Pipe).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooManyOperators {
                kind: ChainKind::Pipe,
                limit: 4
            }
        );
        assert_eq!(err.to_string(), "Maximum 4 piping operations allowed");
    }

    #[test]
    fn reverse_pipe_and_conditional_allow_five() {
        assert!(parse("a ~ b ~ c ~ d ~ e ~ f", ChainKind::ReversePipe).is_ok());
        assert!(parse("a && b || c && d || e && f", ChainKind::Conditional).is_ok());

        let err = parse("a ~ b ~ c ~ d ~ e ~ f ~ g", ChainKind::ReversePipe).unwrap_err();
        assert_eq!(err.to_string(), "Maximum 5 reverse piping operations allowed");

        let err = parse("a && b || c && d || e && f || g", ChainKind::Conditional).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooManyOperators {
                kind: ChainKind::Conditional,
                limit: 5
            }
        );
        assert_eq!(err.to_string(), "Maximum 5 conditional operators allowed");
    }

    #[test]
    fn sequence_allows_four_separators() {
        assert!(parse("a ; b ; c ; d ; e", ChainKind::Sequential).is_ok());

        let err = parse("a ; b ; c ; d ; e ; f", ChainKind::Sequential).unwrap_err();
        assert_eq!(err.to_string(), "Maximum 4 sequential commands allowed");
    }

    #[test]
    fn rejects_empty_segment() {
        let err = parse("ls ; ; pwd", ChainKind::Sequential).unwrap_err();
        assert_eq!(err.to_string(), "Each command argc must be between 1 and 5");

        let err = parse("ls |", ChainKind::Pipe).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Each piped command argc must be between 1 and 5"
        );
    }

    #[test]
    fn rejects_oversized_segment() {
        let err = parse("echo a b c d e && true", ChainKind::Conditional).unwrap_err();
        assert_eq!(
            err,
            ParseError::SegmentSize {
                kind: ChainKind::Conditional,
                max: 5
            }
        );
    }

    #[test]
    fn records_conditional_connectors_in_order() {
        let chain = parse("true && false || echo ok", ChainKind::Conditional).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.connectors, [Connector::And, Connector::Or]);
    }

    #[test]
    fn operator_ceiling_checked_before_segments() {
        let err = parse("; ; ; ; ;", ChainKind::Sequential).unwrap_err();
        assert!(matches!(err, ParseError::TooManyOperators { .. }));
    }

    #[test]
    fn connector_policy() {
        assert!(Connector::And.proceeds_after(true));
        assert!(!Connector::And.proceeds_after(false));
        assert!(Connector::Or.proceeds_after(false));
        assert!(!Connector::Or.proceeds_after(true));
    }
}
