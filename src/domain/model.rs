use crate::utils::error::JobError;

/// One accepted transaction, kept in input order for the anomaly pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub user_id: String,
    pub transaction_id: String,
    pub amount: f64,
}

/// Running sum/count for one user. Created on the first transaction seen
/// for that user and never removed within a run, so `count >= 1` whenever
/// an entry exists.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserTotals {
    pub sum: f64,
    pub count: u64,
}

impl UserTotals {
    pub fn average(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// A `filtered`-tagged catalog record. Printed immediately, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredMovie {
    pub director: String,
    pub year: String,
    pub rating: f64,
    pub movie_name: String,
    pub language: String,
}

/// A per-language count contribution. The count is 1 in practice but is
/// carried as an arbitrary integer contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCount {
    pub language: String,
    pub count: i64,
    pub movie_name: String,
    pub year: String,
    pub rating: f64,
    pub director: String,
}

/// The two wire shapes of the catalog stream, demultiplexed by whether
/// field 0 equals the literal tag `filtered`.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRecord {
    Filtered(FilteredMovie),
    Count(MovieCount),
}

/// Per-language accumulator: total count plus retained movie descriptions
/// in append order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageTotals {
    pub count: i64,
    pub movies: Vec<String>,
}

/// One raw movie row as consumed by the catalog mapper:
/// `movie_id, movie_name, year, rating, director, language`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub movie_id: String,
    pub movie_name: String,
    pub year: String,
    pub rating: f64,
    pub director: String,
    pub language: String,
}

/// Outcome of parsing one input line.
///
/// The transaction reducer treats `Skipped` and `Fatal` identically (drop
/// the line and continue); the catalog stages propagate `Fatal` and abort.
#[derive(Debug)]
pub enum ParseOutcome<T> {
    Accepted(T),
    Skipped,
    Fatal(JobError),
}

/// Result of a job's transform stage: the rendered report plus the number
/// of input lines consumed, for progress logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    pub lines_consumed: usize,
}
