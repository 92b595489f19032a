//! Diagnostic reporting for models that degrade instead of failing.
//!
//! Plant and zone models keep running when an operating point leaves a
//! curve's fitted range or the condenser iteration does not converge. They
//! describe what happened as a [`Diagnostic`] and hand it to an injected
//! [`DiagnosticSink`]; they never log directly.
//!
//! [`RecurringDiagnostics`] is the default sink. It logs through [`tracing`]
//! and rate-limits recurring conditions per `(source, kind)`:
//!
//! - the first occurrence is logged at `warn` level with its full message,
//! - later occurrences are logged at `debug` level and folded into a running
//!   count and min/max of the offending value,
//! - [`RecurringDiagnostics::log_summaries`] emits one `warn` per recurring
//!   condition, typically at the end of a run.
//!
//! Severe diagnostics are logged at `error` level every time.
//!
//! `Vec<Diagnostic>` also implements the sink, which is handy in tests.

use std::collections::HashMap;

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// Evaporator outlet temperature outside the CapFT x domain.
    CapFtEvaporatorRange,
    /// Evaporator outlet temperature outside the EIRFT x domain.
    EirFtEvaporatorRange,
    /// Condenser outlet temperature outside the CapFT y domain.
    CapFtCondenserRange,
    /// Condenser outlet temperature outside the EIRFT y domain.
    EirFtCondenserRange,
    /// Condenser outlet temperature outside the EIRFPLR x domain.
    EirFplrCondenserRange,
    /// Part-load ratio outside the EIRFPLR part-load domain.
    EirFplrPartLoadRange,
    CapFtNegative,
    EirFtNegative,
    EirFplrNegative,
    /// A curve is far from 1.0 at the reference conditions.
    ReferenceCurveValue,
    /// Condenser iteration hit its iteration limit.
    IterationLimit,
    /// Condenser residual did not change sign over the curve bracket.
    NoSolutionInBracket,
    /// Condenser iteration aborted with an error.
    SolverFailed,
    /// Modulated evaporator flow requested with zero evaporator ΔT.
    ZeroEvaporatorDeltaT,
    /// Running with no condenser flow.
    ZeroCondenserFlow,
    /// A zone balance produced a negative concentration.
    NegativeConcentration,
}

/// How a diagnostic is rate-limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported once per occurrence, not rate-limited.
    Warning,
    /// Rate-limited: detailed first, summarized afterwards.
    Recurring,
    /// Likely a configuration or upstream problem; never rate-limited.
    Severe,
}

/// A single non-fatal condition reported by a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Name of the reporting instance.
    pub source: String,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// Offending value tracked in recurring summaries.
    pub value: Option<f64>,
}

impl Diagnostic {
    #[must_use]
    pub fn recurring(
        source: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            source: source.into(),
            kind,
            severity: Severity::Recurring,
            message: message.into(),
            value: Some(value),
        }
    }

    #[must_use]
    pub fn warning(
        source: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            kind,
            severity: Severity::Warning,
            message: message.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn severe(
        source: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            kind,
            severity: Severity::Severe,
            message: message.into(),
            value: None,
        }
    }
}

/// Receives diagnostics from models.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Running totals for one recurring `(source, kind)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Recurrence {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Message of the first occurrence.
    pub message: String,
}

impl Recurrence {
    fn record(&mut self, value: Option<f64>) {
        self.count += 1;
        if let Some(value) = value {
            self.min = Some(self.min.map_or(value, |min| min.min(value)));
            self.max = Some(self.max.map_or(value, |max| max.max(value)));
        }
    }
}

/// Rate-limiting sink that logs through [`tracing`].
#[derive(Debug, Default)]
pub struct RecurringDiagnostics {
    recurring: HashMap<(String, DiagnosticKind), Recurrence>,
}

impl RecurringDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the totals for a recurring condition, if it ever occurred.
    #[must_use]
    pub fn recurrence(&self, source: &str, kind: DiagnosticKind) -> Option<&Recurrence> {
        self.recurring.get(&(source.to_owned(), kind))
    }

    /// Iterates over every recurring condition seen so far.
    pub fn recurrences(&self) -> impl Iterator<Item = (&str, DiagnosticKind, &Recurrence)> {
        self.recurring
            .iter()
            .map(|((source, kind), recurrence)| (source.as_str(), *kind, recurrence))
    }

    /// Emits one summary line per recurring condition.
    pub fn log_summaries(&self) {
        for (source, kind, recurrence) in self.recurrences() {
            tracing::warn!(
                source,
                ?kind,
                count = recurrence.count,
                min = recurrence.min,
                max = recurrence.max,
                "{}",
                recurrence.message
            );
        }
    }
}

impl DiagnosticSink for RecurringDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            source,
            kind,
            severity,
            message,
            value,
        } = diagnostic;

        match severity {
            Severity::Severe => tracing::error!(source = %source, ?kind, "{message}"),
            Severity::Warning => tracing::warn!(source = %source, ?kind, "{message}"),
            Severity::Recurring => {
                let recurrence = self
                    .recurring
                    .entry((source.clone(), kind))
                    .or_insert_with(|| Recurrence {
                        count: 0,
                        min: None,
                        max: None,
                        message: message.clone(),
                    });
                recurrence.record(value);
                if recurrence.count == 1 {
                    tracing::warn!(source = %source, ?kind, value, "{message}");
                } else {
                    tracing::debug!(source = %source, ?kind, value, count = recurrence.count, "{message}");
                }
            }
        }
    }
}
