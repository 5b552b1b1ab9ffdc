//! Benchmark for the oracle, the parser and the solver.

use criterion::{criterion_group, criterion_main, Criterion};
use hilbert_prover::{is_tautology, solve, AxiomSet, Formula, Ledger};
use std::hint::black_box;

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("parse axiom 2", |b| {
        b.iter(|| black_box(Formula::parse("((A >> (B >> C)) >> ((A >> B) >> (A >> C)))").unwrap()));
    });
}

fn benchmark_tautology(c: &mut Criterion) {
    c.bench_function("tautology 3 variables", |b| {
        b.iter(|| black_box(is_tautology("((A >> C) >> ((B >> C) >> ((A | B) >> C)))")));
    });

    c.bench_function("tautology 8 variables", |b| {
        b.iter(|| {
            black_box(is_tautology(
                "~((((A >> B) & (B >> C)) & ((C >> D) & (D >> F))) & (((F >> G) & (G >> H)) & ~(A >> H)))",
            ))
        });
    });
}

fn benchmark_solver(c: &mut Criterion) {
    c.bench_function("solve CS {A>>B, B>>C} |- A>>C", |b| {
        b.iter(|| {
            let mut ledger =
                Ledger::new(&["(A >> B)", "(B >> C)"], "(A >> C)", AxiomSet::standard().unwrap()).unwrap();
            black_box(solve(&mut ledger).unwrap())
        });
    });

    c.bench_function("solve MT chain {F>>K, K>>A, ~A} |- ~F", |b| {
        b.iter(|| {
            let mut ledger =
                Ledger::new(&["(F >> K)", "(K >> A)", "~A"], "~F", AxiomSet::standard().unwrap()).unwrap();
            black_box(solve(&mut ledger).unwrap())
        });
    });
}

criterion_group!(benches, benchmark_parse, benchmark_tautology, benchmark_solver);
criterion_main!(benches);
