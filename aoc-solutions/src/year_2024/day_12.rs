use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use glam::IVec2;
use strum::IntoEnumIterator;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 12, tags = ["2024", "grid", "flood-fill"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, Default)]
struct Region {
    area: u64,
    perimeter: u64,
    /// Equal to the number of sides for a polygon on the grid
    corners: u64,
}

#[derive(Debug)]
pub struct SharedData {
    garden: Grid<u8>,
    regions: Option<Vec<Region>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(SharedData {
            garden: Grid::from_lines(input)?,
            regions: None,
        })
    }
}

fn same_plant(garden: &Grid<u8>, pos: Pos, offset: IVec2) -> bool {
    pos.checked_offset(offset, garden.rows(), garden.cols())
        .is_some_and(|other| garden[other] == garden[pos])
}

/// Convex and concave corners touching `pos`.
fn corners(garden: &Grid<u8>, pos: Pos) -> u64 {
    Direction::iter()
        .filter(|&dir| {
            let (a, b) = (dir.offset(), dir.turn_right().offset());
            let side_a = same_plant(garden, pos, a);
            let side_b = same_plant(garden, pos, b);
            let diagonal = same_plant(garden, pos, a + b);
            (!side_a && !side_b) || (side_a && side_b && !diagonal)
        })
        .count() as u64
}

fn regions(shared: &mut SharedData) -> &[Region] {
    shared.regions.get_or_insert_with(|| {
        let garden = &shared.garden;
        let mut seen = garden.map_fill(false);
        let mut regions = Vec::new();

        for start in garden.positions() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut region = Region::default();
            let mut stack = vec![start];
            while let Some(pos) = stack.pop() {
                region.area += 1;
                region.corners += corners(garden, pos);
                let mut fenced = 4;
                for (_, next) in garden.neighbours(pos) {
                    if garden[next] == garden[pos] {
                        fenced -= 1;
                        if !seen[next] {
                            seen[next] = true;
                            stack.push(next);
                        }
                    }
                }
                region.perimeter += fenced;
            }
            regions.push(region);
        }
        regions
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: u64 = regions(shared).iter().map(|r| r.area * r.perimeter).sum();
        Ok(price.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: u64 = regions(shared).iter().map(|r| r.area * r.corners).sum();
        Ok(price.to_string())
    }
}
