//! Benchmarks for layout, HTML rendering and PDF export.
//!
//! Run with: cargo bench
//!
//! Records are synthetic; entry counts scale the work per render.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resumake::export::{ExportOptions, Exporter};
use resumake::model::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord};
use resumake::render::{to_html, RenderOptions};

/// Creates a record with `entries` items in each repeated section.
fn create_test_record(entries: usize) -> ResumeRecord {
    let mut record = ResumeRecord::new();
    record.personal.full_name = "Ada Lovelace".into();
    record.personal.email = "ada@example.com".into();
    record.personal.phone = "+44 20 7946 0000".into();
    record.personal.city = "London".into();
    record.summary = "Mathematician and writer on the Analytical Engine. ".repeat(4);

    for i in 0..entries {
        record.experience.push(ExperienceEntry {
            job_title: format!("Analyst {}", i),
            company: "Engines Ltd".into(),
            start_date: "2019-03".into(),
            end_date: "2023-06".into(),
            description: "Designed algorithms for the engine and wrote the notes. ".repeat(3),
            ..Default::default()
        });
        record.education.push(EducationEntry {
            degree: format!("Course {}", i),
            institution: "Private tutors".into(),
            ..Default::default()
        });
        record.projects.push(ProjectEntry {
            name: format!("Note {}", i),
            description: "Bernoulli numbers.".into(),
            link: "example.com/notes".into(),
        });
        record.skills.push(format!("Skill {}", i));
    }
    record
}

/// Benchmark layout alone for each family.
fn bench_layout(c: &mut Criterion) {
    let record = create_test_record(10);
    let mut group = c.benchmark_group("layout");

    for id in ["template-01", "template-07", "template-08"] {
        group.bench_function(id, |b| {
            b.iter(|| resumake::layout(black_box(&record), black_box(id)));
        });
    }

    group.finish();
}

/// Benchmark layout plus HTML rendering at various sizes.
fn bench_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_render");
    let options = RenderOptions::default();

    for entries in [1, 10, 50].iter() {
        let record = create_test_record(*entries);
        group.bench_function(format!("{}_entries", entries), |b| {
            b.iter(|| {
                let tree = resumake::layout(black_box(&record), "template-01");
                to_html(&tree, &options).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark PDF export end to end.
fn bench_export(c: &mut Criterion) {
    let record = create_test_record(10);
    let exporter = Exporter::with_defaults(ExportOptions::default());

    c.bench_function("pdf_export", |b| {
        b.iter(|| exporter.export(black_box(&record), "template-01").unwrap());
    });
}

criterion_group!(benches, bench_layout, bench_html, bench_export);
criterion_main!(benches);
