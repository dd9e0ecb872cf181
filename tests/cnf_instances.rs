use cdcl_core::dimacs;
use cdcl_core::{SolveOutcome, Solver};

fn solve(dimacs_src: &str) -> Solver {
    let clauses = dimacs::parse(dimacs_src).expect("fixture must parse");
    let mut solver = Solver::new();
    for clause in clauses {
        solver.add_clause(clause);
    }
    solver
}

#[test]
fn decision_and_propagation_fixture_forces_var_2() {
    let mut solver = solve(include_str!("../cnf_examples/2_2_trivial_decision_and_prop.dimacs"));
    match solver.solve() {
        SolveOutcome::Sat(model) => assert!(model.value("2")),
        SolveOutcome::Unsat => panic!("expected sat"),
    }
}

#[test]
fn propagation_chain_fixture_has_unique_model() {
    let mut solver = solve(include_str!("../cnf_examples/3_3_propagation.dimacs"));
    match solver.solve() {
        SolveOutcome::Sat(model) => {
            assert!(!model.value("1"));
            assert!(!model.value("2"));
            assert!(model.value("3"));
        }
        SolveOutcome::Unsat => panic!("expected sat"),
    }
}
