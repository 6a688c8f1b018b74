use crate::core::catalog::format_rating;
use crate::domain::model::{MovieRow, ParseOutcome, Report};
use crate::domain::ports::{FilterProvider, LineSource, Pipeline, ReportSink};
use crate::utils::error::{JobError, Result};

/// The catalog map stage: filter movie rows by director/year/rating and
/// seed the per-language counts.
///
/// Every well-formed row emits one count-seed line; rows matching the
/// filter additionally emit a `filtered`-tagged line. Blank and short rows
/// are skipped, but an unparseable rating aborts the run.
pub struct CatalogMapper {
    director: String,
    year: String,
    min_rating: f64,
}

impl CatalogMapper {
    pub fn new(filter: &impl FilterProvider) -> Self {
        Self {
            director: filter.director().to_string(),
            year: filter.year().to_string(),
            min_rating: filter.min_rating(),
        }
    }

    /// Input rows are `movie_id, movie_name, year, rating, director,
    /// language`; extra trailing fields are tolerated and ignored.
    fn parse_row(line: &str) -> ParseOutcome<MovieRow> {
        let line = line.trim();
        if line.is_empty() {
            return ParseOutcome::Skipped;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 6 {
            return ParseOutcome::Skipped;
        }
        match fields[3].parse::<f64>() {
            Ok(rating) => ParseOutcome::Accepted(MovieRow {
                movie_id: fields[0].to_string(),
                movie_name: fields[1].to_string(),
                year: fields[2].to_string(),
                rating,
                director: fields[4].to_string(),
                language: fields[5].to_string(),
            }),
            Err(_) => ParseOutcome::Fatal(JobError::MalformedRecord {
                message: format!("invalid rating '{}' in movie row", fields[3]),
            }),
        }
    }

    pub fn map_line(&self, line: &str, out: &mut String) -> Result<()> {
        match Self::parse_row(line) {
            ParseOutcome::Accepted(row) => {
                if row.director == self.director
                    && row.year == self.year
                    && row.rating >= self.min_rating
                {
                    out.push_str(&format!(
                        "filtered\t{}\t{}\t{}\t{}\t{}\n",
                        row.director,
                        row.year,
                        format_rating(row.rating),
                        row.movie_name,
                        row.language
                    ));
                }
                // Count seed, emitted regardless of the filter outcome.
                out.push_str(&format!(
                    "{}\t1\t{}\t{}\t{}\t{}\n",
                    row.language,
                    row.movie_name,
                    row.year,
                    format_rating(row.rating),
                    row.director
                ));
                Ok(())
            }
            ParseOutcome::Skipped => Ok(()),
            ParseOutcome::Fatal(err) => Err(err),
        }
    }
}

pub struct MovieMapPipeline<S: LineSource, K: ReportSink, F: FilterProvider> {
    source: S,
    sink: K,
    filter: F,
}

impl<S: LineSource, K: ReportSink, F: FilterProvider> MovieMapPipeline<S, K, F> {
    pub fn new(source: S, sink: K, filter: F) -> Self {
        Self {
            source,
            sink,
            filter,
        }
    }
}

#[async_trait::async_trait]
impl<S: LineSource, K: ReportSink, F: FilterProvider> Pipeline for MovieMapPipeline<S, K, F> {
    async fn extract(&self) -> Result<Vec<String>> {
        self.source.read_lines().await
    }

    async fn transform(&self, lines: Vec<String>) -> Result<Report> {
        let lines_consumed = lines.len();
        let mapper = CatalogMapper::new(&self.filter);
        let mut text = String::new();
        for line in &lines {
            mapper.map_line(line, &mut text)?;
        }
        Ok(Report {
            text,
            lines_consumed,
        })
    }

    async fn load(&self, report: Report) -> Result<()> {
        self.sink.write_report(&report.text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::MovieFilter;

    fn mapper(director: &str, year: &str, min_rating: f64) -> CatalogMapper {
        CatalogMapper::new(&MovieFilter {
            director: director.to_string(),
            year: year.to_string(),
            min_rating,
        })
    }

    #[test]
    fn test_matching_row_emits_filtered_line_and_count_seed() {
        let m = mapper("Mani Ratnam", "1987", 8.0);
        let mut out = String::new();
        m.map_line("m1\tNayakan\t1987\t8.7\tMani Ratnam\tTamil", &mut out)
            .unwrap();
        assert_eq!(
            out,
            "filtered\tMani Ratnam\t1987\t8.7\tNayakan\tTamil\n\
             Tamil\t1\tNayakan\t1987\t8.7\tMani Ratnam\n"
        );
    }

    #[test]
    fn test_non_matching_row_emits_count_seed_only() {
        let m = mapper("Mani Ratnam", "1987", 8.0);
        let mut out = String::new();
        m.map_line("m2\tSholay\t1975\t8.2\tRamesh Sippy\tHindi", &mut out)
            .unwrap();
        assert_eq!(out, "Hindi\t1\tSholay\t1975\t8.2\tRamesh Sippy\n");
    }

    #[test]
    fn test_rating_below_threshold_is_not_filtered() {
        let m = mapper("Mani Ratnam", "1987", 9.0);
        let mut out = String::new();
        m.map_line("m1\tNayakan\t1987\t8.7\tMani Ratnam\tTamil", &mut out)
            .unwrap();
        assert!(!out.starts_with("filtered"));
    }

    #[test]
    fn test_rating_equal_to_threshold_is_filtered() {
        let m = mapper("Mani Ratnam", "1987", 8.7);
        let mut out = String::new();
        m.map_line("m1\tNayakan\t1987\t8.7\tMani Ratnam\tTamil", &mut out)
            .unwrap();
        assert!(out.starts_with("filtered\t"));
    }

    #[test]
    fn test_blank_and_short_rows_are_skipped() {
        let m = mapper("Mani Ratnam", "1987", 8.0);
        let mut out = String::new();
        m.map_line("", &mut out).unwrap();
        m.map_line("m1\tNayakan\t1987", &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_bad_rating_is_fatal() {
        let m = mapper("Mani Ratnam", "1987", 8.0);
        let mut out = String::new();
        let err = m
            .map_line("m1\tNayakan\t1987\tunrated\tMani Ratnam\tTamil", &mut out)
            .unwrap_err();
        assert!(matches!(err, JobError::MalformedRecord { .. }));
    }

    #[test]
    fn test_integral_rating_round_trips_with_one_decimal() {
        let m = mapper("Nobody", "2000", 9.9);
        let mut out = String::new();
        m.map_line("m3\tDeewaar\t1975\t8\tYash Chopra\tHindi", &mut out)
            .unwrap();
        assert_eq!(out, "Hindi\t1\tDeewaar\t1975\t8.0\tYash Chopra\n");
    }
}
