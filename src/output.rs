// ABOUTME: Terminal feedback for the CLI in human, quiet (CI), or JSON form.
// ABOUTME: Human messages go to stdout, warnings and errors to stderr.

use serde::Serialize;

use crate::report::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress lines while the run advances
    Normal,
    /// Final result only
    Quiet,
    /// One JSON object per line
    Json,
}

/// Prints command feedback according to the selected mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

#[derive(Serialize)]
struct Event<'a> {
    event: &'a str,
    message: &'a str,
}

fn event_line(event: &str, message: &str) -> Option<String> {
    serde_json::to_string(&Event { event, message }).ok()
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Stage progress; shown in normal mode only.
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => {
                if let Some(line) = event_line("success", message) {
                    println!("{line}");
                }
            }
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => {
                if let Some(line) = event_line("warning", message) {
                    eprintln!("{line}");
                }
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => {
                if let Some(line) = event_line("error", message) {
                    eprintln!("{line}");
                }
            }
        }
    }

    /// Final result of a promotion run.
    ///
    /// JSON mode prints the whole report as one object on stdout.
    pub fn report(&self, report: &RunReport) {
        if self.mode == OutputMode::Json {
            match serde_json::to_string(report) {
                Ok(json) => println!("{json}"),
                Err(e) => self.error(&format!("failed to serialize report: {e}")),
            }
            return;
        }

        for warning in &report.warnings {
            self.warning(&warning.message);
        }

        let summary = report.summary();
        if !report.succeeded() {
            self.error(&summary);
        } else if self.mode == OutputMode::Normal {
            println!("{summary} ({:.1}s)", report.duration_secs());
        } else {
            println!("{summary}");
        }
    }
}
