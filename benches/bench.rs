// Criterion benchmarks for MBTI Match

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mbti_match::core::{build_report, candidate_pool, hash_string, mbti_distance};
use mbti_match::{Matcher, PersonalityCode, Profile};

const CODES: [&str; 16] = [
    "INTJ", "INTP", "ENTJ", "ENTP", "INFJ", "INFP", "ENFJ", "ENFP",
    "ISTJ", "ISFJ", "ESTJ", "ESFJ", "ISTP", "ISFP", "ESTP", "ESFP",
];

fn create_profile(id: usize) -> Profile {
    Profile {
        name: Some(format!("User {}", id)),
        name_kor: None,
        name_eng: Some(format!("user{}", id)),
        team: format!("Team {}", id % 8),
        // every 20th entry has no code on record
        mbti: if id % 20 == 19 {
            PersonalityCode::Unset
        } else {
            PersonalityCode::parse(CODES[id % CODES.len()])
        },
        welcome_url: None,
    }
}

fn bench_hash_string(c: &mut Criterion) {
    c.bench_function("hash_string", |b| {
        b.iter(|| hash_string(black_box("Minji Kim|2024-05-20")));
    });
}

fn bench_distance(c: &mut Criterion) {
    let a = PersonalityCode::parse("ENFP");
    let b = PersonalityCode::parse("ISTJ");

    c.bench_function("mbti_distance", |bench| {
        bench.iter(|| mbti_distance(black_box(&a), black_box(&b)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::new();
    let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

    let mut group = c.benchmark_group("matching");

    for roster_size in [10, 50, 100, 500, 1000].iter() {
        let roster: Vec<Profile> = (0..*roster_size).map(create_profile).collect();
        let user = roster[0].clone();

        group.bench_with_input(
            BenchmarkId::new("compute_matches_on", roster_size),
            roster_size,
            |b, _| {
                b.iter(|| {
                    matcher.compute_matches_on(
                        black_box(&user),
                        black_box(&roster),
                        black_box(date),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_candidate_pool(c: &mut Criterion) {
    let roster: Vec<Profile> = (0..100).map(create_profile).collect();
    let user = roster[0].clone();

    c.bench_function("candidate_pool_100_profiles", |b| {
        b.iter(|| black_box(candidate_pool(&user, &roster)));
    });
}

fn bench_report(c: &mut Criterion) {
    let roster: Vec<Profile> = (0..1000).map(create_profile).collect();

    c.bench_function("build_report_1000_profiles", |b| {
        b.iter(|| build_report(black_box(&roster)));
    });
}

criterion_group!(
    benches,
    bench_hash_string,
    bench_distance,
    bench_matching,
    bench_candidate_pool,
    bench_report
);

criterion_main!(benches);
