//! # Reading and writing of transportation problems
//!
//! Problems are stored as whitespace separated integers, line by line:
//!
//! ```text
//! N M
//! s_1 ... s_N
//! d_1 ... d_M
//! c_11 ... c_1M
//! ...
//! c_N1 ... c_NM
//! ```
//!
//! Blank lines are ignored. A solution is written as its total cost on the first line, followed by
//! one line of shipped quantities per supply node.
use std::fs;
use std::io;
use std::path::Path;

use crate::data::allocation::Allocation;
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;
use crate::io::error::{FileLocation, ImportError, ParseError};

pub mod error;

/// Import a problem from a file.
///
/// # Errors
///
/// When the file cannot be found or read, when its contents are not in the text format, or when
/// the numbers don't form a valid, balanced problem.
pub fn import<T: Quantity>(file_path: &Path) -> Result<Problem<T>, ImportError<T>> {
    let program = fs::read_to_string(file_path)?;

    parse(&program)
}

/// Parse a problem in text form.
///
/// # Arguments
///
/// * `program`: Contents of a problem file.
///
/// # Return value
///
/// A validated problem.
pub fn parse<T: Quantity>(program: &str) -> Result<Problem<T>, ImportError<T>> {
    let mut lines = program.lines()
        .enumerate()
        .map(|(number, line)| (number as u64 + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (nr_supplies, nr_demands) = parse_sizes(next_line(&mut lines, "the problem size")?)?;
    let supplies = parse_values(next_line(&mut lines, "the supplies")?, nr_supplies)?;
    let demands = parse_values(next_line(&mut lines, "the demands")?, nr_demands)?;
    let costs = (0..nr_supplies)
        .map(|i| {
            let location = next_line(&mut lines, &format!("cost row {}", i + 1))?;
            parse_values(location, nr_demands)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(location) = lines.next() {
        return Err(ParseError::at("unexpected content after the cost matrix", location).into());
    }

    Ok(Problem::new(supplies, demands, costs)?)
}

/// Write a solution to a file, replacing its contents.
///
/// See `format_solution` for the format.
pub fn export<T: Quantity>(file_path: &Path, allocation: &Allocation<T>, cost: T) -> io::Result<()> {
    fs::write(file_path, format_solution(allocation, cost))
}

/// Total cost on the first line, then the allocation row by row.
pub fn format_solution<T: Quantity>(allocation: &Allocation<T>, cost: T) -> String {
    format!("{}\n{}", cost, allocation)
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = FileLocation<'a>>,
    expected: &str,
) -> Result<FileLocation<'a>, ParseError> {
    lines.next().ok_or_else(|| ParseError::EndOfFile { expected: expected.to_string() })
}

fn parse_sizes(location: FileLocation) -> Result<(usize, usize), ParseError> {
    let sizes = location.1.split_whitespace()
        .map(|token| token.parse::<usize>()
            .map_err(|_| ParseError::at(format!("invalid size \"{}\"", token), location)))
        .collect::<Result<Vec<_>, _>>()?;

    match sizes[..] {
        [nr_supplies, nr_demands] if nr_supplies > 0 && nr_demands > 0 => Ok((nr_supplies, nr_demands)),
        [_, _] => Err(ParseError::at("there should be at least one supply and one demand node", location)),
        _ => Err(ParseError::at(format!("expected 2 sizes, found {}", sizes.len()), location)),
    }
}

fn parse_values<T: Quantity>(location: FileLocation, expected: usize) -> Result<Vec<T>, ParseError> {
    let values = location.1.split_whitespace()
        .map(|token| T::from_str_radix(token, 10)
            .map_err(|_| ParseError::at(format!("invalid number \"{}\"", token), location)))
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() == expected {
        Ok(values)
    } else {
        Err(ParseError::at(format!("expected {} values, found {}", expected, values.len()), location))
    }
}
