//! Grid and operation script parsing
//!
//! Grid files contain one row per line with whitespace-separated values.
//! Scripts contain one operation per line:
//!
//! ```text
//! add x1 x2 y1 y2 delta
//! sum x1 x2 y1 y2
//! padd x y delta
//! get x y
//! total
//! ```
//!
//! In both formats, blank lines and lines starting with `#` are ignored.
//! Coordinates are signed: negative lower bounds are clamped to 0, a negative
//! upper bound makes the range empty.

use std::fmt;
use std::io;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use segtree2d::InvalidDimension;

/// Parse error with its (1-based) line number
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseErrorKind {
    UnknownCommand(String),
    /// `(command, expected, got)`
    ArgumentCount(&'static str, usize, usize),
    InvalidNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ParseErrorKind::UnknownCommand(cmd) => write!(f, "unknown command '{cmd}'"),
            ParseErrorKind::ArgumentCount(cmd, expected, got) => {
                write!(f, "'{cmd}' expects {expected} arguments, got {got}")
            }
            ParseErrorKind::InvalidNumber(token) => write!(f, "invalid number '{token}'"),
        }
    }
}
impl std::error::Error for ParseError {}

/// Error while loading an input file
#[derive(Debug)]
pub enum ScriptError {
    Io(PathBuf, io::Error),
    Parse(PathBuf, ParseError),
    Grid(PathBuf, InvalidDimension),
    Dimension(InvalidDimension),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(path, err) => write!(f, "could not read '{}' ({err})", path.display()),
            ScriptError::Parse(path, err) => write!(f, "{}: {err}", path.display()),
            ScriptError::Grid(path, err) => write!(f, "{}: {err}", path.display()),
            ScriptError::Dimension(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io(_, err) => Some(err),
            ScriptError::Parse(_, err) => Some(err),
            ScriptError::Grid(_, err) | ScriptError::Dimension(err) => Some(err),
        }
    }
}

/// A script operation
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command<V> {
    Add {
        rows: RangeInclusive<usize>,
        cols: RangeInclusive<usize>,
        delta: V,
    },
    Sum {
        rows: RangeInclusive<usize>,
        cols: RangeInclusive<usize>,
    },
    PointAdd {
        x: usize,
        y: usize,
        delta: V,
    },
    Get {
        x: usize,
        y: usize,
    },
    Total,
}

impl<V> Command<V> {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Sum { .. } => "sum",
            Command::PointAdd { .. } => "padd",
            Command::Get { .. } => "get",
            Command::Total => "total",
        }
    }
}

/// Lines with content, numbered from 1
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn number<T: FromStr>(line: usize, token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError {
        line,
        kind: ParseErrorKind::InvalidNumber(token.to_string()),
    })
}

/// Convert a signed inclusive range into a range of indices
///
/// Empty ranges are represented by `1..=0`.
fn axis(lo: i64, hi: i64) -> RangeInclusive<usize> {
    #[allow(clippy::reversed_empty_ranges)]
    const EMPTY: RangeInclusive<usize> = 1..=0;
    if hi < 0 || lo > hi {
        return EMPTY;
    }
    let lo = usize::try_from(std::cmp::max(lo, 0)).unwrap_or(usize::MAX);
    let hi = usize::try_from(hi).unwrap_or(usize::MAX);
    lo..=hi
}

/// Convert a signed coordinate, mapping negative values out of any grid
fn coord(c: i64) -> usize {
    usize::try_from(c).unwrap_or(usize::MAX)
}

/// Parse a grid file
///
/// The rows are not checked for equal lengths here, this happens when building
/// the tree.
pub fn parse_grid<V: FromStr>(text: &str) -> Result<Vec<Vec<V>>, ParseError> {
    content_lines(text)
        .map(|(line, content)| {
            content
                .split_whitespace()
                .map(|token| number(line, token))
                .collect()
        })
        .collect()
}

/// Parse an operation script, returning the commands with their line numbers
pub fn parse_script<V: FromStr>(text: &str) -> Result<Vec<(usize, Command<V>)>, ParseError> {
    content_lines(text)
        .map(|(line, content)| Ok((line, parse_command(line, content)?)))
        .collect()
}

fn parse_command<V: FromStr>(line: usize, content: &str) -> Result<Command<V>, ParseError> {
    let mut tokens = content.split_whitespace();
    let Some(cmd) = tokens.next() else {
        unreachable!("content lines are not empty");
    };
    let args: Vec<&str> = tokens.collect();

    let (name, expected): (&'static str, usize) = match cmd {
        "add" => ("add", 5),
        "sum" => ("sum", 4),
        "padd" => ("padd", 3),
        "get" => ("get", 2),
        "total" => ("total", 0),
        _ => {
            return Err(ParseError {
                line,
                kind: ParseErrorKind::UnknownCommand(cmd.to_string()),
            })
        }
    };
    if args.len() != expected {
        return Err(ParseError {
            line,
            kind: ParseErrorKind::ArgumentCount(name, expected, args.len()),
        });
    }

    let int = |i: usize| number::<i64>(line, args[i]);
    Ok(match name {
        "add" => Command::Add {
            rows: axis(int(0)?, int(1)?),
            cols: axis(int(2)?, int(3)?),
            delta: number(line, args[4])?,
        },
        "sum" => Command::Sum {
            rows: axis(int(0)?, int(1)?),
            cols: axis(int(2)?, int(3)?),
        },
        "padd" => Command::PointAdd {
            x: coord(int(0)?),
            y: coord(int(1)?),
            delta: number(line, args[2])?,
        },
        "get" => Command::Get {
            x: coord(int(0)?),
            y: coord(int(1)?),
        },
        _ => Command::Total,
    })
}
