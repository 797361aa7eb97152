use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["test", "numbers"])]
pub struct Evens;

impl AocParser for Evens {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .map(|t| {
                t.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(t.to_string()))
            })
            .collect()
    }
}

impl PartSolver<1> for Evens {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|n| *n % 2 == 0).count().to_string())
    }
}

impl PartSolver<2> for Evens {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|n| *n % 2 == 0).sum::<u32>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25)]
pub struct FirstLine;

impl AocParser for FirstLine {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .next()
            .ok_or_else(|| ParseError::MissingData("empty input".into()))
    }
}

impl PartSolver<1> for FirstLine {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_uppercase())
    }
}

#[test]
fn plugins_are_collected() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get_info(2023, 4).map(|i| i.parts), Some(2));
    assert_eq!(registry.get_info(2023, 25).map(|i| i.parts), Some(1));
}

#[test]
fn registered_plugin_solves() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2023, 4, "1, 2, 3, 4, 6").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert_eq!(solver.solve(2).unwrap().answer, "12");

    let mut solver = registry.create_solver(2023, 25, "hello\nworld").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "HELLO");
}

#[test]
fn tag_filter_selects_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"numbers"))
        .unwrap()
        .build();

    assert!(registry.contains(2023, 4));
    assert!(!registry.contains(2023, 25));
}

#[test]
fn plugins_cannot_be_registered_twice() {
    let result = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .register_all_plugins();
    assert!(result.is_err());
}
