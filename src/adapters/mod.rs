use crate::domain::ports::{LineSource, ReportSink};
use crate::utils::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

/// Job input: the process's stdin or a file path.
#[derive(Debug, Clone)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl LineSource for Input {
    async fn read_lines(&self) -> Result<Vec<String>> {
        match self {
            Input::Stdin => {
                let mut lines = Vec::new();
                let mut reader = BufReader::new(tokio::io::stdin()).lines();
                while let Some(line) = reader.next_line().await? {
                    lines.push(line);
                }
                Ok(lines)
            }
            Input::File(path) => {
                let contents = tokio::fs::read_to_string(path).await?;
                Ok(contents.lines().map(String::from).collect())
            }
        }
    }
}

/// Job output: the process's stdout or a file path.
#[derive(Debug, Clone)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl ReportSink for Output {
    async fn write_report(&self, text: &str) -> Result<()> {
        match self {
            Output::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(text.as_bytes()).await?;
                stdout.flush().await?;
                Ok(())
            }
            Output::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                tokio::fs::write(path, text.as_bytes()).await?;
                Ok(())
            }
        }
    }
}

/// In-memory line source for tests.
#[derive(Debug, Clone)]
pub struct MemorySource {
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(String::from).collect(),
        }
    }
}

impl LineSource for MemorySource {
    async fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }
}

/// In-memory report sink for tests.
#[derive(Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contents(&self) -> String {
        self.buf.lock().await.clone()
    }
}

impl ReportSink for MemorySink {
    async fn write_report(&self, text: &str) -> Result<()> {
        let mut buf = self.buf.lock().await;
        buf.push_str(text);
        Ok(())
    }
}
