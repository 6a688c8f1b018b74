use crate::domain::model::{
    CatalogRecord, FilteredMovie, LanguageTotals, MovieCount, ParseOutcome, Report,
};
use crate::domain::ports::{LineSource, Pipeline, ReportSink};
use crate::utils::error::{JobError, Result};
use indexmap::IndexMap;

/// Render a rating the way it arrived from a float parse: integral values
/// keep one decimal ("8" parses and prints back as "8.0"), everything else
/// uses the shortest round-trip form ("8.50" becomes "8.5").
pub(crate) fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 && rating.is_finite() {
        format!("{:.1}", rating)
    } else {
        rating.to_string()
    }
}

/// Per-language movie counting plus immediate echo of `filtered` records.
///
/// Strict ingestion: the catalog stream is trusted mapper output, so a
/// malformed line aborts the whole run instead of being skipped.
#[derive(Debug, Default)]
pub struct CatalogReducer {
    languages: IndexMap<String, LanguageTotals>,
}

impl CatalogReducer {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_line(line: &str) -> ParseOutcome<CatalogRecord> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() != 6 {
            return ParseOutcome::Fatal(JobError::MalformedRecord {
                message: format!("expected 6 tab-separated fields, got {}", fields.len()),
            });
        }

        if fields[0] == "filtered" {
            let rating = match fields[3].parse::<f64>() {
                Ok(r) => r,
                Err(_) => {
                    return ParseOutcome::Fatal(JobError::MalformedRecord {
                        message: format!("invalid rating '{}' in filtered record", fields[3]),
                    })
                }
            };
            ParseOutcome::Accepted(CatalogRecord::Filtered(FilteredMovie {
                director: fields[1].to_string(),
                year: fields[2].to_string(),
                rating,
                movie_name: fields[4].to_string(),
                language: fields[5].to_string(),
            }))
        } else {
            let count = match fields[1].parse::<i64>() {
                Ok(c) => c,
                Err(_) => {
                    return ParseOutcome::Fatal(JobError::MalformedRecord {
                        message: format!("invalid count '{}' in count record", fields[1]),
                    })
                }
            };
            let rating = match fields[4].parse::<f64>() {
                Ok(r) => r,
                Err(_) => {
                    return ParseOutcome::Fatal(JobError::MalformedRecord {
                        message: format!("invalid rating '{}' in count record", fields[4]),
                    })
                }
            };
            ParseOutcome::Accepted(CatalogRecord::Count(MovieCount {
                language: fields[0].to_string(),
                count,
                movie_name: fields[2].to_string(),
                year: fields[3].to_string(),
                rating,
                director: fields[5].to_string(),
            }))
        }
    }

    /// Consume one line. Filtered records are echoed to `out` immediately,
    /// in input order; count records only touch the accumulator.
    pub fn consume(&mut self, line: &str, out: &mut String) -> Result<()> {
        match Self::parse_line(line) {
            ParseOutcome::Accepted(CatalogRecord::Filtered(movie)) => {
                out.push_str(&format!(
                    "Filtered Movie: {}, {}, {}, {}, {}\n",
                    movie.movie_name,
                    movie.year,
                    format_rating(movie.rating),
                    movie.director,
                    movie.language
                ));
                Ok(())
            }
            ParseOutcome::Accepted(CatalogRecord::Count(record)) => {
                let totals = self
                    .languages
                    .entry(record.language)
                    .or_insert_with(LanguageTotals::default);
                totals.count += record.count;
                totals.movies.push(format!(
                    "{} ({}) - {} by {}",
                    record.movie_name,
                    record.year,
                    format_rating(record.rating),
                    record.director
                ));
                Ok(())
            }
            ParseOutcome::Skipped => Ok(()),
            ParseOutcome::Fatal(err) => Err(err),
        }
    }

    /// Append the per-language detail blocks and the final summary, both in
    /// first-seen language order. The summary restates the same accumulator
    /// value, it is not recomputed.
    pub fn finish(&self, out: &mut String) {
        for (language, totals) in &self.languages {
            out.push_str(&format!(
                "Language: {}, Movie Count: {}\n",
                language, totals.count
            ));
            for movie in &totals.movies {
                out.push_str(&format!("  {}\n", movie));
            }
        }

        out.push_str("\nSummary:\n");
        for (language, totals) in &self.languages {
            out.push_str(&format!(
                "Language: {}, Total Movies: {}\n",
                language, totals.count
            ));
        }
    }

    #[cfg(test)]
    fn language_totals(&self, language: &str) -> Option<&LanguageTotals> {
        self.languages.get(language)
    }
}

pub struct CatalogPipeline<S: LineSource, K: ReportSink> {
    source: S,
    sink: K,
}

impl<S: LineSource, K: ReportSink> CatalogPipeline<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }
}

#[async_trait::async_trait]
impl<S: LineSource, K: ReportSink> Pipeline for CatalogPipeline<S, K> {
    async fn extract(&self) -> Result<Vec<String>> {
        self.source.read_lines().await
    }

    async fn transform(&self, lines: Vec<String>) -> Result<Report> {
        let lines_consumed = lines.len();
        let mut reducer = CatalogReducer::new();
        let mut text = String::new();
        for line in &lines {
            reducer.consume(line, &mut text)?;
        }
        reducer.finish(&mut text);
        Ok(Report {
            text,
            lines_consumed,
        })
    }

    async fn load(&self, report: Report) -> Result<()> {
        self.sink.write_report(&report.text).await
    }
}
