use crate::error::EngineError;
use crate::parser::parse_str;
use crate::report::{Encoded, KeyboardReport, encode};
use crate::sink::ReportSink;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Pause performed for each `\-`.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Counts from one [`Engine::type_str`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeSummary {
    /// Press reports written (each followed by a release report).
    pub reports: usize,
    /// Delays performed.
    pub delays: usize,
    /// Units skipped because nothing in them maps to a key.
    pub skipped: usize,
}

/// Types strings into a [`ReportSink`].
pub struct Engine<S> {
    sink: S,
    delay: Duration,
}

impl<S: ReportSink> Engine<S> {
    /// Create an engine with the default one-second delay.
    pub fn new(sink: S) -> Self {
        Self::with_delay(sink, DEFAULT_DELAY)
    }

    /// Create an engine with a custom delay length.
    pub fn with_delay(sink: S, delay: Duration) -> Self {
        Engine { sink, delay }
    }

    /// Length of the pause performed for each `\-`.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Give the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Type `input`: one press report and one release report per unit, or a pause for `\-`.
    ///
    /// The whole input is parsed and encoded before the first write, so
    /// malformed escapes and oversized combos type nothing. Unmapped units are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Parse and overflow errors abort before typing. A write failure aborts
    /// immediately; keys already sent stay typed.
    pub async fn type_str(&mut self, input: &str) -> Result<TypeSummary, EngineError> {
        let units = parse_str(input)?;

        let mut summary = TypeSummary::default();
        let mut plan = Vec::with_capacity(units.len());
        for unit in &units {
            match encode(unit) {
                Ok(encoded) => plan.push(encoded),
                Err(err) if err.is_recoverable() => {
                    warn!("{err}, skipping");
                    summary.skipped += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        for encoded in plan {
            match encoded {
                Encoded::Press(report) => {
                    self.press(&report).await?;
                    summary.reports += 1;
                }
                Encoded::Delay => {
                    debug!(delay = ?self.delay, "pausing");
                    sleep(self.delay).await;
                    summary.delays += 1;
                }
            }
        }

        info!(
            reports = summary.reports,
            delays = summary.delays,
            skipped = summary.skipped,
            "finished typing"
        );
        Ok(summary)
    }

    async fn press(&mut self, report: &KeyboardReport) -> Result<(), EngineError> {
        let bytes = report.to_bytes();
        debug!(report = ?bytes, "press");
        self.sink
            .write_report(&bytes)
            .await
            .map_err(EngineError::PressWrite)?;
        self.sink
            .write_report(&KeyboardReport::RELEASE.to_bytes())
            .await
            .map_err(EngineError::ReleaseWrite)
    }
}
