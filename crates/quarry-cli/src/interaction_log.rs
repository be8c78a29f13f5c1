//! Daily plain-text log of chat interactions
//!
//! Each interaction is appended to `<dir>/chat_log_YYYYMMDD.txt`.

use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const RULE: &str = "==================================================";

/// Appends interactions to a per-day file
#[derive(Debug, Clone)]
pub struct InteractionLog {
    dir: PathBuf,
}

impl InteractionLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that interactions at `now` go to
    pub fn file_for(&self, now: &DateTime<Local>) -> PathBuf {
        self.dir
            .join(format!("chat_log_{}.txt", now.format("%Y%m%d")))
    }

    /// Append one interaction, creating the directory if needed
    pub fn append(
        &self,
        question: &str,
        sql: Option<&str>,
        response: Option<&str>,
    ) -> std::io::Result<PathBuf> {
        self.append_at(&Local::now(), question, sql, response)
    }

    pub fn append_at(
        &self,
        now: &DateTime<Local>,
        question: &str,
        sql: Option<&str>,
        response: Option<&str>,
    ) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.file_for(now);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        writeln!(file)?;
        writeln!(file, "{}", RULE)?;
        writeln!(file, "Timestamp: {}", now.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "Question: {}", question)?;
        writeln!(file, "Generated SQL: {}", sql.unwrap_or("No SQL generated"))?;
        writeln!(file, "Response: {}", response.unwrap_or("No response generated"))?;
        writeln!(file, "{}", RULE)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_append_creates_daily_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = InteractionLog::new(dir.path().join("logs"));
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();

        let path = log
            .append_at(&now, "how many films?", Some("SELECT COUNT(*) FROM film"), Some("1000"))
            .unwrap();
        log.append_at(&now, "and actors?", None, None).unwrap();

        assert_eq!(path.file_name().unwrap(), "chat_log_20240309.txt");
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Timestamp: 2024-03-09 14:05:00\nQuestion: how many films?\n"));
        assert!(content.contains("Generated SQL: SELECT COUNT(*) FROM film\nResponse: 1000\n"));
        assert!(content.contains("Generated SQL: No SQL generated\nResponse: No response generated\n"));
        assert_eq!(content.matches(RULE).count(), 4);
    }
}
