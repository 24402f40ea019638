//! Interactive bill form.
//!
//! A terminal rendition of the desktop form: amount, date and file fields,
//! a file browser, a submit action and a scrolling log panel with one line
//! per submission. Typing `:q` or `quit` at any prompt ends the session.

pub mod browse;
pub mod form;
pub mod log_panel;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use console::{style, Term};

use crate::config::Config;
use crate::dedup::DuplicateRegistry;
use crate::error::{Error, Result};
use crate::output::{print_dialog, print_session_stats, SessionStats};

pub use browse::{list_bill_files, pick};
pub use form::{EntryKind, FormHandler, FormInput, LogEntry};
pub use log_panel::LogPanel;

/// Rows reserved for the header and prompts when sizing the log panel.
const CHROME_ROWS: usize = 8;

/// Interactive session state.
struct FormSession<R> {
    term: Term,
    interactive: bool,
    input: R,
    handler: FormHandler,
    panel: LogPanel,
}

/// Run the form until the user quits or input ends.
pub fn run(config: &Config, registry: Arc<DuplicateRegistry>) -> Result<SessionStats> {
    let term = Term::stdout();
    let stdin = std::io::stdin();
    let mut session = FormSession {
        interactive: term.is_term(),
        term,
        input: stdin.lock(),
        handler: FormHandler::new(registry),
        panel: LogPanel::new(config.form.log_capacity),
    };

    session.run()?;

    let stats = *session.handler.stats();
    print_session_stats(&stats);
    Ok(stats)
}

impl<R: BufRead> FormSession<R> {
    fn run(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            let Some(form) = self.read_form()? else {
                return Ok(());
            };

            let result = self.handler.on_submit(&form);
            self.panel.push(LogEntry::from_result(&result));

            if let Err(e) = result {
                if !self.show_error(&e)? {
                    return Ok(());
                }
            }
        }
    }

    fn draw(&self) -> Result<()> {
        if self.interactive {
            self.term.clear_screen()?;
        }

        self.term
            .write_line(&style("Duplicate Bill Checker").cyan().bold().to_string())?;
        self.term.write_line(
            &style("Enter a directory as the bill to browse it. Type :q to quit.")
                .dim()
                .to_string(),
        )?;
        self.term.write_line(&style("─".repeat(50)).dim().to_string())?;

        let rows = self.term.size().0 as usize;
        let visible = rows.saturating_sub(CHROME_ROWS).max(1);
        if self.panel.is_empty() {
            self.term
                .write_line(&style("No bills submitted yet.").dim().to_string())?;
        }
        for entry in self.panel.visible(visible) {
            self.term.write_line(&entry.styled())?;
        }

        self.term.write_line(&style("─".repeat(50)).dim().to_string())?;
        Ok(())
    }

    /// Collect one filled-in form. `None` means the user quit.
    fn read_form(&mut self) -> Result<Option<FormInput>> {
        let Some(amount) = self.prompt("Amount")? else {
            return Ok(None);
        };
        let Some(date) = self.prompt("Date (YYYY-MM-DD)")? else {
            return Ok(None);
        };
        let Some(file) = self.prompt_file()? else {
            return Ok(None);
        };

        Ok(Some(FormInput { amount, date, file }))
    }

    fn prompt_file(&mut self) -> Result<Option<PathBuf>> {
        loop {
            let Some(entered) = self.prompt("Bill file")? else {
                return Ok(None);
            };

            let path = PathBuf::from(&entered);
            if !path.is_dir() {
                return Ok(Some(path));
            }

            match self.browse(&path)? {
                Browse::Picked(file) => return Ok(Some(file)),
                Browse::Quit => return Ok(None),
                Browse::Back => continue,
            }
        }
    }

    fn browse(&mut self, dir: &Path) -> Result<Browse> {
        let files = match list_bill_files(dir) {
            Ok(files) => files,
            Err(e) => {
                return Ok(if self.show_error(&e)? {
                    Browse::Back
                } else {
                    Browse::Quit
                });
            }
        };

        if files.is_empty() {
            self.term.write_line(&format!(
                "{} No files in {}",
                style("WARN").yellow().bold(),
                dir.display()
            ))?;
            return Ok(Browse::Back);
        }

        for (i, file) in files.iter().enumerate() {
            let name = file.file_name().unwrap_or(file.as_os_str());
            self.term
                .write_line(&format!("  {:>3}) {}", i + 1, name.to_string_lossy()))?;
        }

        loop {
            let Some(selection) = self.prompt("Pick a file number (empty to go back)")? else {
                return Ok(Browse::Quit);
            };
            if selection.is_empty() {
                return Ok(Browse::Back);
            }
            if let Some(file) = pick(&files, &selection) {
                return Ok(Browse::Picked(file));
            }
            self.term.write_line(&format!(
                "{} Choose a number between 1 and {}",
                style("WARN").yellow().bold(),
                files.len()
            ))?;
        }
    }

    /// Read one trimmed line. `None` on quit command or end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.term
            .write_str(&format!("{} ", style(format!("{}:", label)).bold()))?;
        self.term.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim();
        if line == ":q" || line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }

    /// Show an error dialog. Returns `false` if the user quit from it.
    fn show_error(&mut self, error: &Error) -> Result<bool> {
        let title = match error {
            Error::InvalidAmount(_) => "Invalid amount",
            Error::InvalidDate(_) => "Invalid date",
            Error::UnreadableFile(_) => "Unreadable file",
            Error::MissingField(_) => "Missing field",
            _ => "Error",
        };
        print_dialog(title, &error.to_string());

        if self.interactive {
            return Ok(self.prompt("Press Enter to continue")?.is_some());
        }
        Ok(true)
    }
}

enum Browse {
    Picked(PathBuf),
    Back,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str, registry: Arc<DuplicateRegistry>) -> FormSession<Cursor<Vec<u8>>> {
        FormSession {
            term: Term::stdout(),
            interactive: false,
            input: Cursor::new(script.as_bytes().to_vec()),
            handler: FormHandler::new(registry),
            panel: LogPanel::new(50),
        }
    }

    #[test]
    fn test_scripted_session() {
        let dir = tempfile::tempdir().unwrap();
        let bill = dir.path().join("march.pdf");
        std::fs::write(&bill, b"abc").unwrap();

        let script = format!(
            "100\n2024-01-01\n{bill}\n200\n2024-02-02\n{bill}\nabc\n2024-01-01\n{bill}\n:q\n",
            bill = bill.display()
        );
        let registry = Arc::new(DuplicateRegistry::new());
        let mut session = session(&script, Arc::clone(&registry));
        session.run().unwrap();

        let kinds: Vec<EntryKind> = session.panel.visible(10).map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [EntryKind::Accepted, EntryKind::Duplicate, EntryKind::Error]
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_browse_directory_pick() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"first").unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"second").unwrap();

        // Pick the second file from the listing, then end of input
        let script = format!("5\n2024-05-05\n{}\n2\n", dir.path().display());
        let registry = Arc::new(DuplicateRegistry::new());
        let mut session = session(&script, Arc::clone(&registry));
        session.run().unwrap();

        let entries: Vec<&LogEntry> = session.panel.visible(10).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Accepted);
        assert!(entries[0].text.contains("b.pdf"));
        assert!(registry.contains(&crate::bill::hash_bytes(b"second")));
    }

    #[test]
    fn test_quit_from_error_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let bill = dir.path().join("march.pdf");
        std::fs::write(&bill, b"abc").unwrap();

        // The error dialog waits for Enter; :q there ends the session before
        // the second form is read
        let script = format!(
            "abc\n2024-01-01\n{bill}\n:q\n100\n2024-01-01\n{bill}\n",
            bill = bill.display()
        );
        let registry = Arc::new(DuplicateRegistry::new());
        let mut session = session(&script, Arc::clone(&registry));
        session.interactive = true;
        session.run().unwrap();

        let kinds: Vec<EntryKind> = session.panel.visible(10).map(|e| e.kind).collect();
        assert_eq!(kinds, [EntryKind::Error]);
        assert!(registry.is_empty());
    }
}
