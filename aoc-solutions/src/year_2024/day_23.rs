use std::collections::BTreeSet;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;

use crate::utils::parse::numbered_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 23, tags = ["2024", "graph", "clique"])]
pub struct Solver;

/// Undirected graph keyed by computer name.
#[derive(Debug)]
pub struct Network<'a> {
    graph: UnGraphMap<&'a str, ()>,
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let edges = numbered_lines(input)
            .map(|(line_no, line)| {
                line.split_once('-').ok_or_else(|| {
                    ParseError::InvalidFormat(format!("(line {line_no}) expected `a-b`, got {line:?}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Network {
            graph: UnGraphMap::from_edges(edges),
        })
    }
}

impl<'a> Network<'a> {
    fn neighbours(&self, node: &'a str) -> BTreeSet<&'a str> {
        self.graph.neighbors(node).collect()
    }

    /// Every triangle once, with its corners in ascending name order.
    fn triangles(&self) -> impl Iterator<Item = [&'a str; 3]> + '_ {
        self.graph.nodes().flat_map(move |a| {
            self.graph
                .neighbors(a)
                .filter(move |&b| b > a)
                .flat_map(move |b| {
                    self.graph
                        .neighbors(a)
                        .filter(move |&c| c > b && self.graph.contains_edge(b, c))
                        .map(move |c| [a, b, c])
                })
        })
    }

    /// Bron–Kerbosch with pivoting; keeps the largest clique seen.
    fn largest_clique(&self) -> Vec<&'a str> {
        let mut best = Vec::new();
        let mut clique = Vec::new();
        let candidates: BTreeSet<&str> = self.graph.nodes().collect();
        self.bron_kerbosch(&mut clique, candidates, BTreeSet::new(), &mut best);
        best
    }

    fn bron_kerbosch(
        &self,
        clique: &mut Vec<&'a str>,
        mut candidates: BTreeSet<&'a str>,
        mut excluded: BTreeSet<&'a str>,
        best: &mut Vec<&'a str>,
    ) {
        if candidates.is_empty() && excluded.is_empty() {
            if clique.len() > best.len() {
                *best = clique.clone();
            }
            return;
        }
        if clique.len() + candidates.len() <= best.len() {
            return;
        }
        let pivot = candidates
            .union(&excluded)
            .max_by_key(|&&v| self.graph.neighbors(v).filter(|n| candidates.contains(n)).count())
            .copied();
        let Some(pivot) = pivot else { return };
        let pivot_links = self.neighbours(pivot);
        let to_visit: Vec<&str> = candidates.difference(&pivot_links).copied().collect();

        for v in to_visit {
            let links = self.neighbours(v);
            clique.push(v);
            self.bron_kerbosch(
                clique,
                candidates.intersection(&links).copied().collect(),
                excluded.intersection(&links).copied().collect(),
                best,
            );
            clique.pop();
            candidates.remove(&v);
            excluded.insert(v);
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .triangles()
            .filter(|triangle| triangle.iter().any(|v| v.starts_with('t')))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // the password lists the clique alphabetically, not in discovery order
        Ok(shared.largest_clique().into_iter().sorted_unstable().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
kh-tc
qp-kh
de-cg
ka-co
yn-aq
qp-ub
cg-tb
vc-aq
tb-ka
wh-tc
yn-cg
kh-ub
ta-co
de-co
tc-td
tb-wq
wh-td
ta-ka
td-qp
aq-cg
wq-ub
ub-vc
de-ta
wq-aq
wq-vc
wh-yn
ka-de
kh-ta
co-tc
wh-qp
tb-vc
td-yn
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "7");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "co,de,ka,ta");
    }

    #[test]
    fn password_is_alphabetical_whatever_the_input_order() {
        let input = "zz-yy\nyy-xx\nzz-xx\nzz-ab\n";
        assert_eq!(solve::<Solver>(input, 2), "xx,yy,zz");
    }

    #[test]
    fn all_triangles() {
        let network = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(network.triangles().count(), 12);
        assert!(network
            .triangles()
            .all(|[a, b, c]| a < b && b < c));
    }
}
