use crate::error::Result;
use crate::utils::single_line;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Append-only text log of translation failures, one line per failed attempt
pub struct DiagnosticLog {
    sink: Option<Mutex<Box<dyn Write + Send>>>,
}

impl DiagnosticLog {
    /// Opens `path` for appending, creating it if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        ::log::debug!("Translation failures logged to {}", path.as_ref().display());
        Ok(Self::from_writer(file))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Some(Mutex::new(Box::new(writer))),
        }
    }

    /// A log that discards every entry
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Records one failed translation attempt together with the chunk text
    pub fn translation_failed(&self, attempt: u32, chunk: &str, error: &dyn std::fmt::Display) {
        let Some(sink) = &self.sink else {
            return;
        };
        let line = format!(
            "ERROR translation attempt {} failed for chunk: {:?}. Error: {}\n",
            attempt,
            chunk,
            single_line(&error.to_string())
        );

        let mut writer = match sink.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writer.write_all(line.as_bytes()).and_then(|_| writer.flush()) {
            ::log::warn!("Failed to write translation diagnostic: {}", e);
        }
    }
}

impl std::fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticLog")
            .field("enabled", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_failure_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translation_errors.log");

        let log = DiagnosticLog::open(&path).unwrap();
        log.translation_failed(1, "Wij zijn\neen bedrijf.", &"HTTP 429\nToo Many Requests");
        drop(log);

        let log = DiagnosticLog::open(&path).unwrap();
        log.translation_failed(2, "Wij zijn\neen bedrijf.", &"timeout");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("attempt 1"));
        assert!(lines[0].contains(r#""Wij zijn\neen bedrijf.""#));
        assert!(lines[0].ends_with("HTTP 429 Too Many Requests"));
        assert!(lines[1].contains("attempt 2"));
    }

    #[test]
    fn test_disabled_log_is_silent() {
        DiagnosticLog::disabled().translation_failed(1, "chunk", &"error");
    }
}
