//! Benchmarks for ratings statistics
//!
//! Run with: cargo bench --package analytics
//!
//! Uses a synthetic table shaped like ml-latest-small (~100k ratings over
//! ~9.7k movies and ~600 users) so no data files are needed.

use analytics::{Entity, Metric, RatingsAnalytics};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Movie, MovieCatalog, Rating};

const MOVIES: usize = 9_700;
const USERS: usize = 610;
const RATINGS: usize = 100_000;

fn synthetic_analytics() -> RatingsAnalytics {
    let movies = (0..MOVIES)
        .map(|i| Movie {
            id: i.to_string(),
            title: format!("Movie {} ({})", i, 1950 + i % 70),
            genres: vec!["Drama".to_string()],
        })
        .collect();

    let ratings = (0..RATINGS)
        .map(|i| Rating {
            user_id: (i % USERS).to_string(),
            movie_id: ((i * 7919) % MOVIES).to_string(),
            rating: ((i * 31) % 10 + 1) as f64 / 2.0,
            timestamp: 900_000_000 + (i as i64) * 6_000,
        })
        .collect();

    RatingsAnalytics::new(ratings, MovieCatalog::from_movies(movies))
}

fn bench_top_by_metric(c: &mut Criterion) {
    let analytics = synthetic_analytics();

    for metric in [Metric::Average, Metric::Median, Metric::Variance] {
        c.bench_function(&format!("top_by_{}_movie", metric), |b| {
            b.iter(|| {
                let top = analytics
                    .top_by_metric(black_box(10), metric, Entity::Movie)
                    .unwrap();
                black_box(top)
            })
        });
    }
}

fn bench_top_by_rating_count(c: &mut Criterion) {
    let analytics = synthetic_analytics();

    c.bench_function("top_by_rating_count_user", |b| {
        b.iter(|| black_box(analytics.top_by_rating_count(black_box(10), Entity::User)))
    });
}

fn bench_distributions(c: &mut Criterion) {
    let analytics = synthetic_analytics();

    c.bench_function("distribution_by_year", |b| {
        b.iter(|| black_box(analytics.distribution_by_year()))
    });
    c.bench_function("distribution_by_rating_value", |b| {
        b.iter(|| black_box(analytics.distribution_by_rating_value()))
    });
}

criterion_group!(
    benches,
    bench_top_by_metric,
    bench_top_by_rating_count,
    bench_distributions
);
criterion_main!(benches);
