//! In-process file operators: `# file`, `a + b [+ c ...]` and `a ++ b`.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::Path,
};

use thiserror::Error;

use crate::{
    config::Limits,
    parse::token::{Token, TokenKind},
};

#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("Command argc must be 2")]
    WordCountArity,
    #[error("Need at least 2 files")]
    TooFewFiles,
    #[error("Maximum {0} concatenation only")]
    TooManyConcats(usize),
    #[error("Few/many arguments received")]
    AppendArity,
    #[error("Invalid format for file append")]
    AppendFormat,
    #[error("Failed to open file {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to open file {path} for writing")]
    OpenForWrite {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The file utilities a line can delegate to.
pub trait FileOp {
    fn word_count(&self, path: &Path) -> Result<usize, FileOpError>;

    /// Streams each file to `out` in order. An unreadable file is reported on
    /// `out` in its place and does not stop the rest.
    fn concat(&self, paths: &[&Path], out: &mut dyn Write) -> Result<(), FileOpError>;

    /// Appends each file's original content to the other.
    fn mutual_append(&self, a: &Path, b: &Path) -> Result<(), FileOpError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

fn read(path: &Path) -> Result<Vec<u8>, FileOpError> {
    fs::read(path).map_err(|source| FileOpError::Open {
        path: path.display().to_string(),
        source,
    })
}

fn append(path: &Path, data: &[u8]) -> Result<(), FileOpError> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|source| FileOpError::OpenForWrite {
            path: path.display().to_string(),
            source,
        })?;
    file.write_all(data)?;
    Ok(())
}

pub fn count_words(data: &[u8]) -> usize {
    data.split(|b| matches!(b, b' ' | b'\n' | b'\t' | b'\r'))
        .filter(|word| !word.is_empty())
        .count()
}

impl FileOp for LocalFiles {
    fn word_count(&self, path: &Path) -> Result<usize, FileOpError> {
        Ok(count_words(&read(path)?))
    }

    fn concat(&self, paths: &[&Path], out: &mut dyn Write) -> Result<(), FileOpError> {
        for path in paths {
            match read(path) {
                Ok(data) => out.write_all(&data)?,
                Err(err) => writeln!(out, "{err}")?,
            }
        }
        out.flush()?;
        Ok(())
    }

    fn mutual_append(&self, a: &Path, b: &Path) -> Result<(), FileOpError> {
        let a_data = read(a)?;
        let b_data = read(b)?;

        append(a, &b_data)?;
        append(b, &a_data)?;
        Ok(())
    }
}

/// A validated file-operator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRequest<'a> {
    WordCount(&'a str),
    Concat(Vec<&'a str>),
    MutualAppend(&'a str, &'a str),
}

impl<'a> FileRequest<'a> {
    /// Whether the line belongs to the file operators at all.
    pub fn matches(tokens: &[Token<'_>]) -> bool {
        tokens.first().map_or(false, |t| t.is(TokenKind::WordCount))
            || tokens
                .iter()
                .any(|t| matches!(t.kind, TokenKind::Concat | TokenKind::MutualAppend))
    }

    pub fn parse(tokens: &[Token<'a>], limits: &Limits) -> Result<Self, FileOpError> {
        if tokens.first().map_or(false, |t| t.is(TokenKind::WordCount)) {
            return match tokens {
                [_, file] => Ok(Self::WordCount(file.text)),
                _ => Err(FileOpError::WordCountArity),
            };
        }

        if tokens.iter().any(|t| t.is(TokenKind::MutualAppend)) {
            return match tokens {
                [a, op, b] if op.is(TokenKind::MutualAppend) => {
                    Ok(Self::MutualAppend(a.text, b.text))
                }
                [_, _, _] => Err(FileOpError::AppendFormat),
                _ => Err(FileOpError::AppendArity),
            };
        }

        let (operators, files): (Vec<&Token<'a>>, Vec<&Token<'a>>) =
            tokens.iter().partition(|t| t.is(TokenKind::Concat));

        if files.len() < 2 {
            return Err(FileOpError::TooFewFiles);
        }
        if operators.len() > limits.max_concat {
            return Err(FileOpError::TooManyConcats(limits.max_concat));
        }

        Ok(Self::Concat(files.into_iter().map(|t| t.text).collect()))
    }

    /// Runs the request, writing status lines and concatenated data to `out`.
    pub fn run(&self, files: &dyn FileOp, out: &mut dyn Write) -> Result<(), FileOpError> {
        match self {
            Self::WordCount(path) => {
                let count = files.word_count(Path::new(path))?;
                writeln!(out, "Total word count is: {count}")?;
            }
            Self::Concat(paths) => {
                let paths = paths.iter().map(Path::new).collect::<Vec<_>>();
                files.concat(&paths, out)?;
            }
            Self::MutualAppend(a, b) => {
                files.mutual_append(Path::new(a), Path::new(b))?;
                writeln!(out, "Files appended successfully")?;
            }
        }
        Ok(())
    }
}
