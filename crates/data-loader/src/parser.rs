//! Parser for MovieLens CSV files.
//!
//! Handles the four tables of the "latest-small" dataset:
//! - links.csv: movieId,imdbId,tmdbId (every line is data)
//! - movies.csv: movieId,title,genres (header skipped)
//! - ratings.csv: userId,movieId,rating,timestamp (header skipped)
//! - tags.csv: userId,movieId,tag,timestamp (every line is data)
//!
//! The header policy differs between the two families on purpose and callers
//! rely on it: a links/tags header line is processed like any other row.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Whether the first line of a file is a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Drop the first line
    Skip,
    /// Every line is data
    Keep,
}

/// Split one CSV line into fields.
///
/// A comma separates fields only when the rest of the line after it holds an
/// even number of `"` characters, so commas inside a quoted field survive.
/// Each field then loses any leading and trailing quote characters.
///
/// Example: `"Toy Story, The",1995,Comedy` -> ["Toy Story, The", "1995", "Comedy"]
pub fn split_line(line: &str) -> Row {
    let line = line.trim();
    let mut remaining_quotes = line.matches('"').count();
    let mut fields = Vec::new();
    let mut start = 0;

    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => remaining_quotes -= 1,
            ',' if remaining_quotes % 2 == 0 => {
                fields.push(strip_quotes(&line[start..idx]));
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(strip_quotes(&line[start..]));
    fields
}

fn strip_quotes(field: &str) -> String {
    field.trim_matches('"').to_string()
}

/// Read a CSV file into rows.
///
/// Blank lines are skipped. Fails with `FileNotFound` when the file is absent
/// and `IoError` on any other read failure.
pub fn read_rows(path: &Path, header: Header) -> Result<Vec<Row>> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let skip = match header {
        Header::Skip => 1,
        Header::Keep => 0,
    };

    Ok(content
        .lines()
        .skip(skip)
        .filter(|line| !line.trim().is_empty())
        .map(split_line)
        .collect())
}

/// Run one of the `parse_*` functions on `path`, returning no records on failure.
///
/// This is the boundary every component loads its table through: a missing
/// or unreadable file is logged and the caller sees an empty table.
///
/// Example: `load_or_empty(&paths.tags, parse_tags)`
pub fn load_or_empty<T>(path: &Path, parse: impl FnOnce(&Path) -> Result<Vec<T>>) -> Vec<T> {
    match parse(path) {
        Ok(records) => {
            info!("Loaded {} rows from {}", records.len(), path.display());
            records
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Parse links.csv. Every line, including a header, becomes a link.
pub fn parse_links(path: &Path) -> Result<Vec<Link>> {
    let rows = read_rows(path, Header::Keep)?;
    Ok(collect_rows(path, rows, link_from_row))
}

/// Parse movies.csv, skipping its header.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let rows = read_rows(path, Header::Skip)?;
    Ok(collect_rows(path, rows, movie_from_row))
}

/// Parse ratings.csv, skipping its header.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let rows = read_rows(path, Header::Skip)?;
    Ok(collect_rows(path, rows, rating_from_row))
}

/// Parse tags.csv. Every line, including a header, becomes a tag.
pub fn parse_tags(path: &Path) -> Result<Vec<Tag>> {
    let rows = read_rows(path, Header::Keep)?;
    Ok(collect_rows(path, rows, tag_from_row))
}

/// Convert rows with `convert`, dropping the ones that fail.
fn collect_rows<T>(
    path: &Path,
    rows: Vec<Row>,
    convert: impl Fn(&str, usize, Row) -> Result<T>,
) -> Vec<T> {
    let file = file_name(path);
    let total = rows.len();
    let parsed: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match convert(&file, idx + 1, row) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Skipping row: {}", e);
                None
            }
        })
        .collect();

    if parsed.len() < total {
        debug!("{}: skipped {} of {} rows", file, total - parsed.len(), total);
    }
    parsed
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn require_fields(file: &str, row_no: usize, row: &Row, expected: usize) -> Result<()> {
    if row.len() < expected {
        return Err(DataLoadError::FieldCountMismatch {
            file: file.to_string(),
            expected,
            found: row.len(),
            row: row_no,
        });
    }
    Ok(())
}

fn link_from_row(file: &str, row_no: usize, row: Row) -> Result<Link> {
    require_fields(file, row_no, &row, 2)?;
    let mut fields = row.into_iter();

    // Arity was checked above, so only tmdbId can be missing.
    Ok(Link {
        movie_id: fields.next().unwrap_or_default(),
        imdb_id: fields.next().unwrap_or_default(),
        tmdb_id: fields.next().unwrap_or_default(),
    })
}

fn movie_from_row(file: &str, row_no: usize, row: Row) -> Result<Movie> {
    require_fields(file, row_no, &row, 3)?;

    // Genres are always the last field, even if a stray quote produced extra splits.
    let genres = row[row.len() - 1]
        .split('|')
        .map(|genre| genre.to_string())
        .collect();

    Ok(Movie {
        id: row[0].clone(),
        title: row[1].clone(),
        genres,
    })
}

fn rating_from_row(file: &str, row_no: usize, row: Row) -> Result<Rating> {
    require_fields(file, row_no, &row, 4)?;

    Ok(Rating {
        user_id: row[0].clone(),
        movie_id: row[1].clone(),
        rating: row[2].trim().parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            row: row_no,
            reason: format!("Invalid rating: {}", e),
        })?,
        timestamp: row[3].trim().parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            row: row_no,
            reason: format!("Invalid timestamp: {}", e),
        })?,
    })
}

fn tag_from_row(file: &str, row_no: usize, row: Row) -> Result<Tag> {
    require_fields(file, row_no, &row, 3)?;

    Ok(Tag {
        user_id: row[0].clone(),
        movie_id: row[1].clone(),
        tag: row[2].trim().to_string(),
        timestamp: row.get(3).and_then(|ts| ts.trim().parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_split_quoted_comma() {
        let row = split_line(r#""Toy Story, The",1995,Comedy"#);
        assert_eq!(row, vec!["Toy Story, The", "1995", "Comedy"]);
    }

    #[test]
    fn test_split_plain_line() {
        let row = split_line("1,Toy Story (1995),Adventure|Animation\n");
        assert_eq!(row.len(), 3);
        assert_eq!(row[2], "Adventure|Animation");
    }

    #[test]
    fn test_split_keeps_empty_fields() {
        assert_eq!(split_line("1,,3"), vec!["1", "", "3"]);
    }

    #[test]
    fn test_split_unbalanced_quote() {
        // Odd quote count: no comma has an even remainder before the quote.
        let row = split_line(r#"1,"broken,2"#);
        assert_eq!(row, vec![r#"1,"broken"#, "2"]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = read_rows(Path::new("definitely/not/here.csv"), Header::Keep);
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_or_empty() {
        let missing = load_or_empty(Path::new("definitely/not/here.csv"), parse_tags);
        assert!(missing.is_empty());

        let file = write_csv("1,0114709,862\n2,0113497,8844\n");
        let links = load_or_empty(file.path(), parse_links);
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].movie_id, "2");
    }

    #[test]
    fn test_header_policy() {
        let file = write_csv("movieId,imdbId,tmdbId\n1,0114709,862\n\n2,0113497,8844\n");

        let kept = read_rows(file.path(), Header::Keep).unwrap();
        let skipped = read_rows(file.path(), Header::Skip).unwrap();

        assert_eq!(kept.len(), 3);
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0][0], "1");
    }

    #[test]
    fn test_parse_links_keeps_header_row() {
        let file = write_csv("movieId,imdbId,tmdbId\n1,0114709,862\n3,0113228\n");
        let links = parse_links(file.path()).unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].imdb_id, "imdbId");
        assert_eq!(links[2].tmdb_id, "");
    }

    #[test]
    fn test_parse_movies_skips_header() {
        let file = write_csv(
            "movieId,title,genres\n\
             1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n\
             11,\"American President, The (1995)\",Comedy|Drama|Romance\n\
             99,Broken\n",
        );
        let movies = parse_movies(file.path()).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].genres.len(), 5);
        assert_eq!(movies[1].title, "American President, The (1995)");
    }

    #[test]
    fn test_parse_ratings_skips_bad_rows() {
        let file = write_csv(
            "userId,movieId,rating,timestamp\n\
             1,1,4.0,964982703\n\
             1,3,oops,964981247\n\
             1,6,4.0\n\
             2,6,3.5,964982224\n",
        );
        let ratings = parse_ratings(file.path()).unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].rating, 3.5);
        assert_eq!(ratings[1].timestamp, 964982224);
    }

    #[test]
    fn test_parse_tags_tolerates_header() {
        let file = write_csv(
            "userId,movieId,tag,timestamp\n\
             2,60756,funny,1445714994\n\
             2,60756,  Highly quotable ,1445714996\n",
        );
        let tags = parse_tags(file.path()).unwrap();

        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].tag, "tag");
        assert_eq!(tags[0].timestamp, None);
        assert_eq!(tags[2].tag, "Highly quotable");
        assert_eq!(tags[2].timestamp, Some(1445714996));
    }
}
