use std::fs;

use transport_simplex::algorithm::construction::Heuristic;
use transport_simplex::algorithm::modi::RefinerConfig;
use transport_simplex::algorithm::portfolio::{solve, solve_all};
use transport_simplex::data::allocation::Allocation;
use transport_simplex::data::problem::ProblemError;
use transport_simplex::io::error::ImportError;
use transport_simplex::io::{export, format_solution, import, parse};

use super::get_test_file_path;

fn solve_file(name: &str) -> i64 {
    let problem = import::<i64>(&get_test_file_path(name)).unwrap();
    let portfolio = solve_all(&problem, &Heuristic::ALL, RefinerConfig::default()).unwrap();

    let costs = portfolio.iter()
        .map(|(_, result)| result.as_ref().unwrap().cost)
        .collect::<Vec<_>>();
    assert_eq!(costs.len(), 3);
    assert!(costs.iter().all(|&cost| cost == costs[0]));

    let best = portfolio.into_best().unwrap();
    best.allocation.check_feasible(&problem).unwrap();
    assert!(best.allocation.nr_positive() <= problem.basis_size());
    assert_eq!(best.allocation.total_cost(&problem), best.cost);

    best.cost
}

#[test]
fn two_by_three() {
    assert_eq!(solve_file("two_by_three"), 465);
}

#[test]
fn degenerate() {
    assert_eq!(solve_file("degenerate"), 20);
}

#[test]
fn three_by_four() {
    assert_eq!(solve_file("three_by_four"), 743);
}

#[test]
fn four_by_five() {
    assert_eq!(solve_file("four_by_five"), 3100);
}

#[test]
fn unbalanced() {
    let result = import::<i64>(&get_test_file_path("unbalanced"));
    assert!(matches!(result, Err(ImportError::Problem(ProblemError::Unbalanced { supply: 51, demand: 50 }))));
}

#[test]
fn files_resolve_from_any_directory() {
    for name in ["two_by_three", "degenerate", "three_by_four", "four_by_five", "unbalanced"] {
        let path = get_test_file_path(name);
        assert!(path.is_absolute());
        assert!(path.is_file(), "missing {}", path.display());
    }
}

#[test]
fn missing_file() {
    let result = import::<i64>(&get_test_file_path("does_not_exist"));
    assert!(matches!(result, Err(ImportError::Io(_))));
}

#[test]
fn write_and_read_back() {
    let problem = import::<i64>(&get_test_file_path("two_by_three")).unwrap();
    let run = solve(&problem, &[Heuristic::NorthwestCorner], RefinerConfig::default()).unwrap();
    assert_eq!(run.initial_cost, 515);
    assert_eq!(run.stats.pivots, 1);

    let path = std::env::temp_dir().join("transport_simplex_two_by_three_solution.txt");
    export(&path, &run.allocation, run.cost).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "465\n0 20 0\n10 5 15\n");
    assert_eq!(written, format_solution(&run.allocation, run.cost));

    let mut lines = written.lines();
    let cost = lines.next().unwrap().parse::<i64>().unwrap();
    let rows = lines
        .map(|line| line.split_whitespace().map(|value| value.parse::<i64>().unwrap()).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let allocation = Allocation::from_rows(rows).unwrap();
    allocation.check_feasible(&problem).unwrap();
    assert_eq!(allocation.total_cost(&problem), cost);
    fs::remove_file(&path).unwrap();
}

#[test]
fn wide_integers() {
    let program = fs::read_to_string(get_test_file_path("three_by_four")).unwrap();
    let problem = parse::<i128>(&program).unwrap();
    let run = solve(&problem, &Heuristic::ALL, RefinerConfig::default()).unwrap();
    assert_eq!(run.cost, 743);

    let problem = parse::<i32>(&program).unwrap();
    let run = solve(&problem, &[Heuristic::VogelApproximation], RefinerConfig::default()).unwrap();
    assert_eq!(run.cost, 743);
}
