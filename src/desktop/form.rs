//! Submit handling for the bill form, independent of the terminal.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use console::style;

use crate::bill::parse_amount;
use crate::dedup::{DuplicateRegistry, Outcome, Submission};
use crate::error::{Error, Result};
use crate::output::SessionStats;

/// Raw values entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub amount: String,
    pub date: String,
    pub file: PathBuf,
}

/// Handles form events by forwarding them to the registry.
#[derive(Debug)]
pub struct FormHandler {
    registry: Arc<DuplicateRegistry>,
    stats: SessionStats,
}

impl FormHandler {
    pub fn new(registry: Arc<DuplicateRegistry>) -> Self {
        Self {
            registry,
            stats: SessionStats::default(),
        }
    }

    /// Handle the submit action.
    pub fn on_submit(&mut self, input: &FormInput) -> Result<Submission> {
        let result = self.submit(input);
        match &result {
            Ok(submission) => self.stats.record_outcome(&submission.outcome),
            Err(e) => {
                tracing::warn!("Rejected form submission: {}", e);
                self.stats.record_error();
            }
        }
        result
    }

    fn submit(&self, input: &FormInput) -> Result<Submission> {
        let amount = parse_amount(&input.amount)?;
        if input.file.as_os_str().is_empty() {
            return Err(Error::MissingField("bill".to_string()));
        }
        self.registry.submit_file(amount, &input.date, &input.file)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn registry(&self) -> &DuplicateRegistry {
        &self.registry
    }
}

/// Kind of a log panel line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Accepted,
    Duplicate,
    Error,
}

/// One line in the log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl LogEntry {
    pub fn submitted(submission: &Submission) -> Self {
        let bill = submission.bill.summary();
        let (kind, verdict) = match &submission.outcome {
            Outcome::Accepted(_) => (EntryKind::Accepted, "Bill added"),
            Outcome::Duplicate(_) => (EntryKind::Duplicate, "Duplicate bill"),
        };

        Self {
            kind,
            text: format!(
                "{}: amount {} on {} ({}) hash {}",
                verdict,
                bill.amount,
                bill.date,
                submission.bill.file_path().display(),
                submission.outcome.digest()
            ),
        }
    }

    pub fn failed(error: &Error) -> Self {
        Self {
            kind: EntryKind::Error,
            text: error.to_string(),
        }
    }

    pub fn from_result(result: &Result<Submission>) -> Self {
        match result {
            Ok(submission) => Self::submitted(submission),
            Err(e) => Self::failed(e),
        }
    }

    fn tag(&self) -> &'static str {
        match self.kind {
            EntryKind::Accepted => "ACCEPTED",
            EntryKind::Duplicate => "DUPLICATE",
            EntryKind::Error => "ERROR",
        }
    }

    /// The line with its tag colored for the terminal.
    pub fn styled(&self) -> String {
        let tag = match self.kind {
            EntryKind::Accepted => style(self.tag()).green().bold(),
            EntryKind::Duplicate => style(self.tag()).yellow().bold(),
            EntryKind::Error => style(self.tag()).red().bold(),
        };
        format!("[{}] {}", tag, self.text)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.tag(), self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn input(amount: &str, date: &str, file: &Path) -> FormInput {
        FormInput {
            amount: amount.to_string(),
            date: date.to_string(),
            file: file.to_path_buf(),
        }
    }

    #[test]
    fn test_submit_then_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("march.pdf");
        let copy = dir.path().join("march copy.pdf");
        std::fs::write(&first, b"abc").unwrap();
        std::fs::write(&copy, b"abc").unwrap();

        let mut handler = FormHandler::new(Arc::new(DuplicateRegistry::new()));

        let result = handler.on_submit(&input("100", "2024-01-01", &first));
        let entry = LogEntry::from_result(&result);
        assert_eq!(entry.kind, EntryKind::Accepted);
        assert!(entry.to_string().starts_with("[ACCEPTED] Bill added: amount 100 on 2024-01-01"));

        let result = handler.on_submit(&input("200", "2024-02-02", &copy));
        let entry = LogEntry::from_result(&result);
        assert_eq!(entry.kind, EntryKind::Duplicate);
        assert!(entry.text.ends_with(
            "hash ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        ));

        assert_eq!(handler.stats().accepted, 1);
        assert_eq!(handler.stats().duplicates, 1);
        assert_eq!(handler.registry().len(), 1);
    }

    #[test]
    fn test_invalid_amount() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bill.pdf");
        std::fs::write(&file, b"abc").unwrap();

        let mut handler = FormHandler::new(Arc::new(DuplicateRegistry::new()));
        let result = handler.on_submit(&input("abc", "2024-01-01", &file));

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
        assert_eq!(LogEntry::from_result(&result).kind, EntryKind::Error);
        assert!(handler.registry().is_empty());
        assert_eq!(handler.stats().errors, 1);
    }

    #[test]
    fn test_missing_and_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = FormHandler::new(Arc::new(DuplicateRegistry::new()));

        let result = handler.on_submit(&input("10", "2024-01-01", Path::new("")));
        assert!(matches!(result, Err(Error::MissingField(_))));

        let result = handler.on_submit(&input("10", "2024-01-01", &dir.path().join("gone.pdf")));
        assert!(matches!(result, Err(Error::UnreadableFile(_))));

        assert!(handler.registry().is_empty());
        assert_eq!(handler.stats().errors, 2);
    }
}
