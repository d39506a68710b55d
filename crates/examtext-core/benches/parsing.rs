use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examtext_core::model::ExamModel;
use examtext_core::parser::parse_questions;
use examtext_core::sections::split_sections;

fn build_exam(questions: usize) -> String {
    let mut s = String::from("Exam Questions\n");
    for i in 1..=questions {
        if i % 3 == 0 {
            s.push_str(&format!("{i}. Explain concept number {i} in your own words.\n\n"));
        } else {
            s.push_str(&format!(
                "{i}. Which statement about topic {i} is true?\nA) first\nB) second\nC) third\nD) fourth\n\n"
            ));
        }
    }
    s.push_str("Answer Key\n");
    for i in 1..=questions {
        if i % 3 == 0 {
            s.push_str(&format!("{i}) A model answer for concept {i}.\n"));
        } else {
            s.push_str(&format!("{i}) C — the third statement holds\n"));
        }
    }
    s.push_str("\nReferences\n[1] Course notes, pp. 1-40\n");
    s
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_sections");

    let small = build_exam(10);
    let large = build_exam(200);
    let headerless = "1. What is 2+2?\nA) 3\nB) 4\n\n2. Explain gravity.\n";

    group.bench_function("small", |b| b.iter(|| split_sections(black_box(&small))));
    group.bench_function("large", |b| b.iter(|| split_sections(black_box(&large))));
    group.bench_function("headerless", |b| {
        b.iter(|| split_sections(black_box(headerless)))
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let large = build_exam(200);
    let sections = split_sections(&large);

    group.bench_function("questions_200", |b| {
        b.iter(|| parse_questions(black_box(&sections.questions)))
    });

    group.bench_function("full_pipeline_200", |b| {
        b.iter(|| ExamModel::from_text(black_box(&large)))
    });

    group.finish();
}

criterion_group!(benches, bench_split, bench_parse);
criterion_main!(benches);
