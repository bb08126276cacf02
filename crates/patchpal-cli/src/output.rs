use patchpal_core::{EventSink, SessionEvent};
use std::io::{self, Stderr, Stdout, Write};

/// Prints session events: the response on `out`, diagnostics on `err`.
pub struct Printer<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Printer<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Printer<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_event(&mut self, event: SessionEvent) -> io::Result<()> {
        match event {
            SessionEvent::TextDelta(text) => {
                write!(self.out, "{text}")?;
                self.out.flush()
            }
            SessionEvent::ResponseComplete => writeln!(self.out, "\n"),
            SessionEvent::InterruptWarning => writeln!(self.out, "\n^C again to quit"),
            SessionEvent::ExternalChanges { paths } if paths.is_empty() => {
                writeln!(self.out, "Files changed outside the session.")
            }
            SessionEvent::ExternalChanges { paths } => {
                writeln!(self.out, "Files changed outside the session: {}", paths.join(", "))
            }
            SessionEvent::FileCreated { path } => writeln!(self.out, "Created {path}"),
            SessionEvent::EditApplied { path } => writeln!(self.out, "Applied edit to {path}"),
            SessionEvent::FallbackStarted { path, model } => {
                writeln!(self.out, "Asking {model} to apply ambiguous edit to {path}...")
            }
            SessionEvent::EditFailed { path, error } => {
                writeln!(self.err, "Failed to apply edit to {path}: {error}")
            }
            SessionEvent::Error(e) => writeln!(self.err, "\nError: {e}"),
        }
    }
}

impl<O: Write, E: Write> EventSink for Printer<O, E> {
    fn emit(&mut self, event: SessionEvent) {
        if let Err(e) = self.write_event(event) {
            tracing::debug!("Failed to print session event: {e}");
        }
    }
}
