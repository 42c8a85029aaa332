use crate::config::resolve_data_path;
use crate::error::{LoadError, LoadResult};
use crate::types::{RawRow, Review};
use crate::util::parse_i64_safe;
use csv::ReaderBuilder;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load every review from the CSV at `path`, preserving row order.
///
/// Relative paths are resolved against the program's data base directory.
/// Any unreadable file or non-integer `Review_ID`/`Rating` aborts the load;
/// there is no partial dataset.
pub fn load_reviews(path: &Path) -> LoadResult<Vec<Review>> {
    let path = resolve_data_path(path);
    info!("Loading reviews from {}", path.display());
    let file = File::open(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let reviews = read_reviews(file)?;
    info!("Loaded {} reviews", reviews.len());
    Ok(reviews)
}

/// Parse reviews from any CSV source with a header row.
pub fn read_reviews<R: Read>(source: R) -> LoadResult<Vec<Review>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(source);
    let mut reviews = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        let row_no = idx + 1;

        let id = parse_i64_safe(&row.review_id).ok_or_else(|| LoadError::InvalidInteger {
            row: row_no,
            column: "Review_ID",
            value: row.review_id.clone(),
        })?;
        let rating = parse_i64_safe(&row.rating).ok_or_else(|| LoadError::InvalidInteger {
            row: row_no,
            column: "Rating",
            value: row.rating.clone(),
        })?;

        reviews.push(Review {
            id,
            rating,
            period: row.year_month,
            location: row.reviewer_location,
            park: row.branch,
        });
    }

    debug!("Parsed {} CSV rows", reviews.len());
    Ok(reviews)
}
