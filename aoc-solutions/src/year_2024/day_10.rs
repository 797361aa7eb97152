use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 10, tags = ["2024", "grid", "graph"])]
pub struct Solver;

/// Height for cells that cannot be stepped on (`.` in hand-drawn maps).
const IMPASSABLE: u8 = u8::MAX;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |pos, c| match c {
            '.' => Ok(IMPASSABLE),
            _ => c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                ParseError::InvalidFormat(format!("(line {}) expected a height, got {c:?}", pos.row + 1))
            }),
        })
    }
}

fn uphill(map: &Grid<u8>, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
    let height = map[pos];
    map.neighbours(pos)
        .map(|(_, next)| next)
        .filter(move |&next| height < 9 && map[next] == height + 1)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map = &*shared;
        // stamp per trailhead so each peak counts once
        let mut visited = map.map_fill(usize::MAX);
        let mut score = 0;
        for (id, head) in map.positions().filter(|&p| map[p] == 0).enumerate() {
            let mut stack = vec![head];
            visited[head] = id;
            while let Some(pos) = stack.pop() {
                if map[pos] == 9 {
                    score += 1;
                    continue;
                }
                for next in uphill(map, pos) {
                    if visited[next] != id {
                        visited[next] = id;
                        stack.push(next);
                    }
                }
            }
        }
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map = &*shared;
        // trails[p]: distinct trails from p to any 9, filled from the top down
        let mut trails = map.map_fill(0u64);
        for height in (0..=9).rev() {
            for pos in map.positions().filter(|&p| map[p] == height) {
                trails[pos] = if height == 9 {
                    1
                } else {
                    uphill(map, pos).map(|next| trails[next]).sum()
                };
            }
        }
        let rating: u64 = map.positions().filter(|&p| map[p] == 0).map(|p| trails[p]).sum();
        Ok(rating.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "36");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "81");
    }

    #[test]
    fn ratings() {
        let three = "\
.....0.
..4321.
..5..2.
..6543.
..7..4.
..8765.
..9....
";
        let thirteen = "\
..90..9
...1.98
...2..7
6543456
765.987
876....
987....
";
        let many = "\
012345
123456
234567
345678
4.6789
56789.
";
        assert_eq!(solve::<Solver>(three, 2), "3");
        assert_eq!(solve::<Solver>(thirteen, 2), "13");
        assert_eq!(solve::<Solver>(many, 2), "227");
    }

    #[test]
    fn score_counts_reachable_peaks() {
        let input = "\
...0...
...1...
...2...
6543456
7.....7
8.....8
9.....9
";
        assert_eq!(solve::<Solver>(input, 1), "2");
    }
}
