use crate::domain::model::{ParseOutcome, Report, Transaction, UserTotals};
use crate::domain::ports::{LineSource, Pipeline, ReportSink};
use crate::utils::error::Result;
use indexmap::IndexMap;

/// Per-user transaction statistics with anomaly flagging.
///
/// Two passes: the first accumulates sum/count per user and retains every
/// accepted transaction in input order; the second classifies each retained
/// transaction against the final per-user mean. A transaction is an anomaly
/// when its amount strictly exceeds twice that mean — equal to the
/// threshold is not flagged.
#[derive(Debug, Default)]
pub struct TransactionReducer {
    totals: IndexMap<String, UserTotals>,
    transactions: Vec<Transaction>,
}

impl TransactionReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient ingestion: a line is accepted only with exactly 3 tab-separated
    /// fields and a parseable amount. Anything else is dropped silently.
    fn parse_line(line: &str) -> ParseOutcome<Transaction> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() != 3 {
            return ParseOutcome::Skipped;
        }
        match fields[2].parse::<f64>() {
            Ok(amount) => ParseOutcome::Accepted(Transaction {
                user_id: fields[0].to_string(),
                transaction_id: fields[1].to_string(),
                amount,
            }),
            Err(_) => ParseOutcome::Skipped,
        }
    }

    pub fn observe(&mut self, line: &str) {
        match Self::parse_line(line) {
            ParseOutcome::Accepted(txn) => {
                let totals = self
                    .totals
                    .entry(txn.user_id.clone())
                    .or_insert_with(UserTotals::default);
                totals.sum += txn.amount;
                totals.count += 1;
                self.transactions.push(txn);
            }
            // Best-effort ingestion: bad lines contribute nothing.
            ParseOutcome::Skipped | ParseOutcome::Fatal(_) => {}
        }
    }

    /// Final mean per user, in first-seen user order. Defined for every
    /// entry because entry creation and first-transaction storage happen
    /// together, so count >= 1.
    fn averages(&self) -> IndexMap<String, f64> {
        self.totals
            .iter()
            .map(|(user, totals)| (user.clone(), totals.average()))
            .collect()
    }

    /// Render both report sections. The framing (blank lines, the leading
    /// space before "b)") is load-bearing for downstream tooling.
    pub fn render(&self) -> String {
        let averages = self.averages();
        let mut out = String::new();

        out.push_str("a) Average transaction amount per user:\n\n");
        for (user, avg) in &averages {
            out.push_str(&format!("{}\t{:.2}\n", user, avg));
        }

        out.push_str("\n b) Anomalies:\n");
        for txn in &self.transactions {
            if let Some(avg) = averages.get(&txn.user_id) {
                if txn.amount > 2.0 * avg {
                    out.push_str(&format!(
                        "{}\t{}\t{:.2} ANOMALY\n",
                        txn.transaction_id, txn.user_id, txn.amount
                    ));
                }
            }
        }
        out
    }

    #[cfg(test)]
    fn user_count(&self) -> usize {
        self.totals.len()
    }
}

pub struct TransactionPipeline<S: LineSource, K: ReportSink> {
    source: S,
    sink: K,
}

impl<S: LineSource, K: ReportSink> TransactionPipeline<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }
}

#[async_trait::async_trait]
impl<S: LineSource, K: ReportSink> Pipeline for TransactionPipeline<S, K> {
    async fn extract(&self) -> Result<Vec<String>> {
        self.source.read_lines().await
    }

    async fn transform(&self, lines: Vec<String>) -> Result<Report> {
        let lines_consumed = lines.len();
        let mut reducer = TransactionReducer::new();
        for line in &lines {
            reducer.observe(line);
        }
        Ok(Report {
            text: reducer.render(),
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

    fn reduce(lines: &[&str]) -> String {
        let mut reducer = TransactionReducer::new();
        for line in lines {
            reducer.observe(line);
        }
        reducer.render()
    }

    #[test]
    fn test_average_and_anomaly_example() {
        let report = reduce(&["u1\tt1\t10", "u1\tt2\t10", "u1\tt3\t100"]);
        assert_eq!(
            report,
            "a) Average transaction amount per user:\n\n\
             u1\t40.00\n\
             \n b) Anomalies:\n\
             t3\tu1\t100.00 ANOMALY\n"
        );
    }

    #[test]
    fn test_boundary_amount_is_not_an_anomaly() {
        // 60 == 2 * mean(10, 20, 60); strictly-greater rule leaves it out.
        let report = reduce(&["u1\tt1\t10", "u1\tt2\t20", "u1\tt3\t60"]);
        assert!(!report.contains("ANOMALY"));
        assert!(report.contains("u1\t30.00\n"));
    }

    #[test]
    fn test_users_reported_in_first_seen_order() {
        let report = reduce(&["beta\tt1\t5", "alpha\tt2\t5", "beta\tt3\t5"]);
        let beta = report.find("beta\t5.00").unwrap();
        let alpha = report.find("alpha\t5.00").unwrap();
        assert!(beta < alpha);
    }

    #[test]
    fn test_anomalies_in_input_order_not_grouped_by_user() {
        let report = reduce(&[
            "u1\tt1\t10",
            "u2\tt2\t10",
            "u1\tt3\t100",
            "u2\tt4\t200",
            "u1\tt5\t10",
        ]);
        let anomalies: Vec<&str> = report
            .lines()
            .filter(|l| l.ends_with("ANOMALY"))
            .collect();
        assert_eq!(
            anomalies,
            vec!["t3\tu1\t100.00 ANOMALY", "t4\tu2\t200.00 ANOMALY"]
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped_silently() {
        let mut reducer = TransactionReducer::new();
        reducer.observe("u1\tt1\tNaN_amount");
        reducer.observe("u1\tt2");
        reducer.observe("u1\tt3\t10\textra");
        reducer.observe("");
        assert_eq!(reducer.user_count(), 0);
        let report = reducer.render();
        assert_eq!(
            report,
            "a) Average transaction amount per user:\n\n\n b) Anomalies:\n"
        );
    }

    #[test]
    fn test_whitespace_padded_line_is_accepted() {
        let report = reduce(&["  u1\tt1\t25.5  "]);
        assert!(report.contains("u1\t25.50\n"));
    }

    #[test]
    fn test_empty_input_produces_bare_frame() {
        let report = reduce(&[]);
        assert_eq!(
            report,
            "a) Average transaction amount per user:\n\n\n b) Anomalies:\n"
        );
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end_in_memory() {
        use crate::adapters::{MemorySink, MemorySource};

        let source = MemorySource::new(vec![
            "u1\tt1\t10".to_string(),
            "garbage line".to_string(),
            "u1\tt2\t10".to_string(),
            "u1\tt3\t100".to_string(),
        ]);
        let sink = MemorySink::new();
        let pipeline = TransactionPipeline::new(source, sink.clone());

        let lines = pipeline.extract().await.unwrap();
        let report = pipeline.transform(lines).await.unwrap();
        assert_eq!(report.lines_consumed, 4);
        pipeline.load(report).await.unwrap();

        let written = sink.contents().await;
        assert!(written.contains("u1\t40.00"));
        assert!(written.contains("t3\tu1\t100.00 ANOMALY"));
    }
}
