use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;

const PROGRESS_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes to stderr so a JSON report on stdout stays clean. The fetch
/// progress bar is created lazily on the first progress update.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> Option<ProgressBar> {
        let mut slot = self.progress_bar.lock().ok()?;
        if let Some(pb) = slot.as_ref() {
            return Some(pb.clone());
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            pb.set_style(style.progress_chars("=>-"));
        }
        *slot = Some(pb.clone());
        Some(pb)
    }

    fn active_progress_bar(&self) -> Option<ProgressBar> {
        self.progress_bar
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().filter(|pb| !pb.is_finished()).cloned())
    }

    /// Prints above the bar while it is drawn, plain stderr otherwise
    fn print_line(&self, line: String) {
        match self.active_progress_bar() {
            Some(pb) if !pb.is_hidden() => pb.println(line),
            _ => eprintln!("{}", line),
        }
    }

    fn finish_progress_bar(&self) {
        if let Some(pb) = self.active_progress_bar() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print_line(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let Some(pb) = self.get_or_create_progress_bar(total) else {
            return;
        };
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
        if current >= total {
            pb.finish_and_clear();
        }
    }

    fn report_error(&self, message: &str) {
        self.print_line(message.yellow().to_string());
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        eprintln!("{}", message.bold().green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = StderrProgressReporter::new();
        reporter.report("Test message");
        reporter.report_progress(5, 10, Some("org/repo"));
        reporter.report_error("Test error");
        reporter.report_completion("Test completion");
    }

    #[test]
    fn test_progress_bar_finishes_at_total() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 2, None);
        assert!(reporter.active_progress_bar().is_some());
        reporter.report_progress(2, 2, None);
        assert!(reporter.active_progress_bar().is_none());
    }
}
