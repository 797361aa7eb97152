//! Small parsing helpers producing [`ParseError`]s with line context

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use aoc_solver::ParseError;
use regex::Regex;

static SIGNED_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("valid integer regex"));

/// Parses a single token, naming the (1-based) `line` on failure.
pub fn number<T>(token: &str, line: usize) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    token
        .trim()
        .parse()
        .map_err(|e| ParseError::InvalidFormat(format!("(line {line}) {token:?}: {e}")))
}

/// Every signed integer appearing in `text`, in order.
///
/// ```
/// use aoc_solutions::utils::parse::numbers;
///
/// let v: Vec<i32> = numbers("p=0,4 v=3,-3").unwrap();
/// assert_eq!(v, vec![0, 4, 3, -3]);
/// ```
pub fn numbers<T>(text: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    SIGNED_INT
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .parse()
                .map_err(|e| ParseError::InvalidFormat(format!("{:?} in {text:?}: {e}", m.as_str())))
        })
        .collect()
}

/// Exactly `N` integers from `text`.
pub fn numbers_exact<T, const N: usize>(text: &str) -> Result<[T; N], ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let found = numbers::<T>(text)?;
    let count = found.len();
    found.try_into().map_err(|_| {
        ParseError::InvalidFormat(format!("expected {N} numbers in {text:?}, found {count}"))
    })
}

/// Groups lines into blocks separated by blank lines; blank runs never
/// produce empty blocks.
pub fn split_blocks(input: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in input.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Non-empty lines paired with their 1-based line numbers.
pub fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
}
