//! End-to-end checks over small MovieLens-shaped files on disk.

use analytics::{Dataset, Entity, LinkedMovieAnalytics, Metric, TagAnalytics};
use data_loader::DataPaths;
use metadata::{FieldName, ScrapedFields, StaticProvider};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_TAGS: &str = "userId,movieId,tag,timestamp
2,60756,funny,1445714994
2,60756,Highly quotable,1445714996
2,60756,will ferrell,1445714992
2,89774,Boxing story,1445715207
2,89774,MMA,1445715200
2,89774,Tom Hardy,1445715205
2,106782,drugs,1445715054";

const SAMPLE_LINKS: &str = "movieId,imdbId,tmdbId
1,0114709,862
2,0113497,8844
3,0113228,15602";

const SAMPLE_MOVIES: &str = "movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,Grumpier Old Men (1995),Comedy|Romance";

const SAMPLE_RATINGS: &str = "userId,movieId,rating,timestamp
1,1,4.0,964982703
1,3,4.0,964981247
2,1,3.0,1445714835
2,2,5.0,1445715000
3,1,4.5,1445714900
3,3,1.0,1445715100";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn create_test_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tags.csv", SAMPLE_TAGS);
    write(dir.path(), "links.csv", SAMPLE_LINKS);
    write(dir.path(), "movies.csv", SAMPLE_MOVIES);
    write(dir.path(), "ratings.csv", SAMPLE_RATINGS);
    dir
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn create_test_provider() -> StaticProvider {
    StaticProvider::new()
        .with_entry(
            "tt0114709",
            ScrapedFields::default()
                .with(FieldName::Director, "John Lasseter")
                .with(FieldName::Budget, "$30,000,000 (estimated)")
                .with(FieldName::CumulativeWorldwideGross, "$394,436,586")
                .with(FieldName::Runtime, "1h 21m"),
        )
        .with_entry(
            "tt0113497",
            ScrapedFields::default()
                .with(FieldName::Director, "Joe Johnston")
                .with(FieldName::Budget, "$65,000,000 (estimated)")
                .with(FieldName::CumulativeWorldwideGross, "$262,821,940")
                .with(FieldName::Runtime, "1h 44m"),
        )
        .with_entry(
            "tt0113228",
            ScrapedFields::default()
                .with(FieldName::Director, "Howard Deutch")
                .with(FieldName::Budget, "$25,000,000 (estimated)")
                .with(FieldName::CumulativeWorldwideGross, "$71,518,503")
                .with(FieldName::Runtime, "1h 41m"),
        )
}

fn is_sorted_desc<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] >= w[1])
}

#[test]
fn test_sample_tags() {
    init_tracing();
    let dir = create_test_dir();
    let tags = TagAnalytics::load(&dir.path().join("tags.csv"));

    // The header line is read as a tag of its own.
    assert_eq!(tags.distinct_tags().len(), 8);

    let most_words = tags.top_by_word_count(3);
    assert_eq!(most_words.len(), 3);
    let counts: Vec<usize> = most_words.iter().map(|(_, c)| *c).collect();
    assert!(is_sorted_desc(&counts));

    let longest = tags.top_by_length(3);
    assert_eq!(longest, vec!["Highly quotable", "will ferrell", "Boxing story"]);

    let both = tags.top_by_word_count_and_length(3);
    assert!(both.contains("Highly quotable"));
    assert!(both.contains("will ferrell"));

    let popular = tags.top_by_frequency(3);
    assert_eq!(popular.len(), 3);
    let counts: Vec<usize> = popular.iter().map(|(_, c)| *c).collect();
    assert!(is_sorted_desc(&counts));

    let funny = tags.tags_containing("FUNNY");
    assert_eq!(funny, vec!["funny"]);
}

#[test]
fn test_missing_tags_file_is_empty() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let tags = TagAnalytics::load(&dir.path().join("tags.csv"));

    assert!(tags.distinct_tags().is_empty());
    assert!(tags.top_by_frequency(5).is_empty());
    assert!(tags.tags_containing("funny").is_empty());
}

#[test]
fn test_sample_links() {
    init_tracing();
    let dir = create_test_dir();
    let paths = DataPaths::from_dir(dir.path());
    let links = LinkedMovieAnalytics::load(&paths, create_test_provider());

    let rows = links.fetch_metadata_fields(links.links(), &[FieldName::Director]);
    let flat: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.movie_id.as_str(), r.values[0].as_str()))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("3", "Howard Deutch"),
            ("2", "Joe Johnston"),
            ("1", "John Lasseter"),
        ]
    );

    assert_eq!(links.top_directors(3).len(), 3);

    let expensive = links.top_by_budget(3);
    assert_eq!(expensive[0], ("Jumanji (1995)".to_string(), 65_000_000.0));
    assert_eq!(expensive.len(), 3);

    let profitable = links.top_by_profit(3);
    assert_eq!(profitable[0], ("Toy Story (1995)".to_string(), 364_436_586.0));

    let longest = links.top_by_runtime(3);
    assert_eq!(
        longest,
        vec![
            ("Jumanji (1995)".to_string(), 104),
            ("Grumpier Old Men (1995)".to_string(), 101),
            ("Toy Story (1995)".to_string(), 81),
        ]
    );

    let per_minute = links.top_by_cost_per_minute(3);
    assert_eq!(per_minute.len(), 3);
    let values: Vec<f64> = per_minute.iter().map(|(_, v)| *v).collect();
    assert!(is_sorted_desc(&values));
}

#[test]
fn test_dataset_load() {
    init_tracing();
    let dir = create_test_dir();
    let dataset = Dataset::load(&DataPaths::from_dir(dir.path()));

    assert_eq!(dataset.catalog.len(), 3);
    assert_eq!(dataset.ratings.ratings().len(), 6);
    // links.csv keeps its header line as a row.
    assert_eq!(dataset.links.len(), 4);

    let most_rated = dataset.ratings.top_by_rating_count(1, Entity::Movie);
    assert_eq!(most_rated, vec![("Toy Story (1995)".to_string(), 3)]);

    let averages = dataset
        .ratings
        .top_by_metric(3, Metric::Average, Entity::Movie)
        .unwrap();
    assert_eq!(
        averages,
        vec![
            ("Jumanji (1995)".to_string(), 5.0),
            ("Toy Story (1995)".to_string(), 3.83),
            ("Grumpier Old Men (1995)".to_string(), 2.5),
        ]
    );

    let by_value = dataset.ratings.distribution_by_rating_value();
    let keys: Vec<f64> = by_value.iter().map(|(k, _)| *k).collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));

    let provider = create_test_provider();
    let linked = dataset.linked(provider);
    assert_eq!(linked.top_directors(5).len(), 3);
    // Three movies plus the header row.
    assert_eq!(linked.provider().calls(), 4);
}
