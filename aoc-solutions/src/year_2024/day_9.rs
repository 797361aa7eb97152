use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 9, tags = ["2024"])]
pub struct Solver;

/// Alternating file and free-space lengths, file first.
#[derive(Debug)]
pub struct DiskMap(Vec<u8>);

impl AocParser for Solver {
    type SharedData<'a> = DiskMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lengths = input
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("expected a digit, got {c:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if lengths.is_empty() {
            return Err(ParseError::MissingData("empty disk map".into()));
        }
        Ok(DiskMap(lengths))
    }
}

/// Σ id × block index over `len` blocks starting at `start`.
fn span_checksum(id: usize, start: usize, len: usize) -> u64 {
    // start + (start + 1) + ... + (start + len - 1)
    let positions = len * start + len * len.saturating_sub(1) / 2;
    (id * positions) as u64
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut blocks: Vec<Option<usize>> = Vec::new();
        for (i, &len) in shared.0.iter().enumerate() {
            let id = (i % 2 == 0).then_some(i / 2);
            blocks.extend(std::iter::repeat_n(id, len as usize));
        }

        let (mut front, mut back) = (0, blocks.len());
        loop {
            while front < back && blocks[front].is_some() {
                front += 1;
            }
            while back > front && blocks[back - 1].is_none() {
                back -= 1;
            }
            if back <= front + 1 {
                break;
            }
            blocks.swap(front, back - 1);
        }

        let checksum: u64 = blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, id)| id.map(|id| (pos * id) as u64))
            .sum();
        Ok(checksum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut files = Vec::new();
        // min-heap of gap starts per gap length 0..=9
        let mut gaps: [BinaryHeap<Reverse<usize>>; 10] = Default::default();
        let mut offset = 0;
        for (i, &len) in shared.0.iter().enumerate() {
            let len = len as usize;
            if i % 2 == 0 {
                files.push((offset, len));
            } else if len > 0 {
                gaps[len].push(Reverse(offset));
            }
            offset += len;
        }

        let mut checksum = 0;
        for (id, &(start, len)) in files.iter().enumerate().rev() {
            // left-most gap that fits, among all gap lengths >= len
            let best = (len..10)
                .filter_map(|gap_len| gaps[gap_len].peek().map(|Reverse(s)| (*s, gap_len)))
                .filter(|&(gap_start, _)| gap_start < start)
                .min();

            match best {
                Some((gap_start, gap_len)) => {
                    gaps[gap_len].pop();
                    if gap_len > len {
                        gaps[gap_len - len].push(Reverse(gap_start + len));
                    }
                    checksum += span_checksum(id, gap_start, len);
                }
                None => checksum += span_checksum(id, start, len),
            }
        }
        Ok(checksum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "2333133121414131402\n";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "1928");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "2858");
    }

    #[test]
    fn small_map() {
        // 0..111....22222 -> 022111222
        assert_eq!(solve::<Solver>("12345", 1), "60");
        // nothing fits to the left, so the layout is unchanged
        assert_eq!(solve::<Solver>("12345", 2), "132");
    }

    #[test]
    fn span_checksum_matches_sum() {
        assert_eq!(span_checksum(3, 4, 3), 3 * (4 + 5 + 6));
        assert_eq!(span_checksum(7, 10, 0), 0);
    }
}
