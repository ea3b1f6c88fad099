use std::io::Write;

use posting::JobPosting;
use tracing::warn;

use crate::view::Renderer;

/// Renders the popup as plain text. Fragments are flushed as they arrive so
/// the estimate appears progressively.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            warn!("Could not write to output: {e}");
        }
    }
}

/// Location, department, employment type, compensation badge, remote flag.
pub fn job_meta(posting: &JobPosting) -> Vec<String> {
    let mut meta: Vec<String> = [
        posting.location(),
        posting.department(),
        posting.employment_type(),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect();

    if let Some(summary) = posting.compensation_summary() {
        meta.push(format!("[{summary}]"));
    }
    if posting.remote() {
        meta.push("Remote".to_string());
    }
    meta
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn notice(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }

    fn job(&mut self, posting: &JobPosting) {
        let meta = job_meta(posting);
        if meta.is_empty() {
            self.emit(&format!("{}\n\n", posting.title));
        } else {
            self.emit(&format!("{}\n{}\n\n", posting.title, meta.join(" · ")));
        }
    }

    fn description(&mut self, text: &str) {
        self.emit(&format!("{text}\n\n"));
    }

    fn prediction_started(&mut self) {
        self.emit("Analyzing...\n\n");
    }

    fn fragment(&mut self, text: &str) {
        self.emit(text);
    }

    fn cached(&mut self, text: &str) {
        self.emit(&format!("(served from cache)\n\n{text}\n"));
    }

    fn error(&mut self, message: &str) {
        self.emit(&format!("\nError: {message}\n"));
    }

    fn prediction_finished(&mut self) {
        self.emit("\n");
    }
}
