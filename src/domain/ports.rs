use crate::domain::model::Report;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where a job's input lines come from (stdin, a file, or an in-memory
/// fixture in tests).
pub trait LineSource: Send + Sync {
    fn read_lines(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

/// Where a job's rendered report goes.
pub trait ReportSink: Send + Sync {
    fn write_report(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Filter parameters for the catalog mapper, regardless of whether they
/// arrived via CLI positionals or a TOML file.
pub trait FilterProvider: Send + Sync {
    fn director(&self) -> &str;
    fn year(&self) -> &str;
    fn min_rating(&self) -> f64;
}

/// One job stage end to end: read the input stream, transform it (map or
/// reduce), write the result.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, lines: Vec<String>) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<()>;
}
