//! Aggregation of token sequences into a [`Report`].
//!
//! An [`Accumulator`] is the mutable state of one run. It is consumed by [`Accumulator::finish`],
//! so a run is finalized exactly once and cannot resume accumulating afterwards.

use serde::Serialize;

use crate::classify::{classify, Classified};
use crate::observability::{AggregationObserver, TokenEvent};
use crate::types::Token;

/// Message carried by a [`Report`] that has no mean.
pub const NO_VALID_DATA: &str = "no valid data to compute an average";

/// Running totals for a single aggregation run.
///
/// Invariant: `valid_count + invalid_count == processed()`, and `total` is the sum of exactly the
/// values that were counted as valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    total: f64,
    valid_count: usize,
    invalid_count: usize,
}

impl Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `token` and fold the outcome in. Returns the outcome so callers can log it.
    pub fn push(&mut self, token: &Token) -> Classified {
        let outcome = classify(token);
        match outcome {
            Classified::Valid(v) => self.add_value(v),
            Classified::Invalid(_) => self.add_invalid(),
        }
        outcome
    }

    /// Record an already-validated number.
    pub fn add_value(&mut self, value: f64) {
        self.total += value;
        self.valid_count += 1;
    }

    /// Record one invalid entry. The total is untouched.
    pub fn add_invalid(&mut self) {
        self.invalid_count += 1;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    /// Number of entries folded so far.
    pub fn processed(&self) -> usize {
        self.valid_count + self.invalid_count
    }

    /// Finalize the run.
    pub fn finish(self) -> Report {
        let mean = if self.valid_count > 0 {
            Some(self.total / self.valid_count as f64)
        } else {
            None
        };
        Report {
            total: self.total,
            valid_count: self.valid_count,
            invalid_count: self.invalid_count,
            mean,
            message: mean.is_none().then(|| NO_VALID_DATA.to_string()),
        }
    }
}

/// Final, immutable result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    total: f64,
    valid_count: usize,
    invalid_count: usize,
    mean: Option<f64>,
    message: Option<String>,
}

impl Report {
    /// The report for a run that saw no tokens (or whose source could not be read).
    pub fn empty() -> Self {
        Accumulator::new().finish()
    }

    /// Sum of all valid values.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    /// Arithmetic mean of the valid values; `None` when there were none.
    pub fn mean(&self) -> Option<f64> {
        self.mean
    }

    /// Explanation for a missing mean.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Total number of entries that were classified.
    pub fn processed(&self) -> usize {
        self.valid_count + self.invalid_count
    }

    /// Returns `true` if no entries at all were processed.
    pub fn is_empty(&self) -> bool {
        self.processed() == 0
    }
}

/// Aggregate a token sequence.
///
/// Every token is classified exactly once, in order. Invalid tokens are counted and skipped;
/// they never abort the run.
///
/// # Examples
///
/// ```rust
/// use rust_value_aggregation::aggregate::aggregate;
/// use rust_value_aggregation::types::Token;
///
/// let tokens = vec![Token::from(10), Token::from("abc"), Token::from(20)];
/// let report = aggregate(&tokens);
/// assert_eq!(report.total(), 30.0);
/// assert_eq!(report.valid_count(), 2);
/// assert_eq!(report.invalid_count(), 1);
/// assert_eq!(report.mean(), Some(15.0));
/// assert_eq!(report.message(), None);
/// ```
pub fn aggregate(tokens: &[Token]) -> Report {
    fold(tokens, None)
}

/// Like [`aggregate`], but reports each classification outcome and the final report to
/// `observer`.
pub fn aggregate_with(tokens: &[Token], observer: &dyn AggregationObserver) -> Report {
    fold(tokens, Some(observer))
}

fn fold(tokens: &[Token], observer: Option<&dyn AggregationObserver>) -> Report {
    if tokens.is_empty() {
        let report = Report::empty();
        if let Some(obs) = observer {
            obs.on_finished(&report);
        }
        return report;
    }

    let mut acc = Accumulator::new();
    for (index, token) in tokens.iter().enumerate() {
        let outcome = acc.push(token);
        if let Some(obs) = observer {
            obs.on_token(&TokenEvent {
                index,
                token,
                outcome,
            });
        }
    }

    let report = acc.finish();
    if let Some(obs) = observer {
        obs.on_finished(&report);
    }
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::{aggregate, aggregate_with, Accumulator, Report, NO_VALID_DATA};
    use crate::classify::{Classified, InvalidReason};
    use crate::observability::{AggregationObserver, TokenEvent};
    use crate::types::Token;

    fn tokens(items: Vec<Token>) -> Vec<Token> {
        items
    }

    #[test]
    fn empty_input_yields_empty_report_with_message() {
        let r = aggregate(&[]);
        assert_eq!(r.total(), 0.0);
        assert_eq!(r.valid_count(), 0);
        assert_eq!(r.invalid_count(), 0);
        assert_eq!(r.mean(), None);
        assert_eq!(r.message(), Some(NO_VALID_DATA));
        assert!(r.is_empty());
        assert_eq!(r, Report::empty());
    }

    #[test]
    fn invalid_values_do_not_affect_total() {
        let r = aggregate(&tokens(vec![10.into(), "abc".into(), 20.into()]));
        assert_eq!(r.total(), 30.0);
        assert_eq!(r.valid_count(), 2);
        assert_eq!(r.invalid_count(), 1);
        assert_eq!(r.mean(), Some(15.0));
        assert_eq!(r.message(), None);
    }

    #[test]
    fn all_invalid_values_have_no_mean() {
        let r = aggregate(&tokens(vec!["abc".into(), "def".into(), "ghi".into()]));
        assert_eq!(r.total(), 0.0);
        assert_eq!(r.valid_count(), 0);
        assert_eq!(r.invalid_count(), 3);
        assert_eq!(r.mean(), None);
        assert_eq!(r.message(), Some(NO_VALID_DATA));
        assert!(!r.is_empty());
    }

    #[test]
    fn mixed_values() {
        let r = aggregate(&tokens(vec![
            10.into(),
            20.into(),
            "abc".into(),
            30.into(),
            "def".into(),
        ]));
        assert_eq!(r.total(), 60.0);
        assert_eq!(r.valid_count(), 3);
        assert_eq!(r.invalid_count(), 2);
        assert_eq!(r.mean(), Some(20.0));
    }

    #[test]
    fn zeros_are_counted_as_valid() {
        let r = aggregate(&tokens(vec![0.into(), 0.into(), 0.into()]));
        assert_eq!(r.total(), 0.0);
        assert_eq!(r.valid_count(), 3);
        assert_eq!(r.invalid_count(), 0);
        assert_eq!(r.mean(), Some(0.0));
        assert_eq!(r.message(), None);
    }

    #[test]
    fn null_is_counted_as_invalid() {
        let r = aggregate(&tokens(vec![10.into(), Token::Null, 20.into()]));
        assert_eq!(r.total(), 30.0);
        assert_eq!(r.valid_count(), 2);
        assert_eq!(r.invalid_count(), 1);
        assert_eq!(r.mean(), Some(15.0));
        assert_eq!(r.message(), None);
    }

    #[test]
    fn accumulator_tracks_values_and_invalids() {
        let mut acc = Accumulator::new();
        acc.add_value(-10.0);
        assert_eq!(acc.total(), -10.0);
        assert_eq!(acc.valid_count(), 1);

        acc.add_invalid();
        assert_eq!(acc.invalid_count(), 1);
        assert_eq!(acc.total(), -10.0);
        assert_eq!(acc.processed(), 2);

        assert_eq!(acc.push(&Token::from(" 2.75 ")), Classified::Valid(2.75));
        let r = acc.finish();
        assert!((r.total() - (-7.25)).abs() < 1e-12);
        assert_eq!(r.valid_count(), 2);
    }

    #[derive(Default)]
    struct Recording {
        outcomes: Mutex<Vec<(usize, Classified)>>,
        finished: Mutex<Vec<Report>>,
    }

    impl AggregationObserver for Recording {
        fn on_token(&self, event: &TokenEvent<'_>) {
            self.outcomes
                .lock()
                .unwrap()
                .push((event.index, event.outcome));
        }

        fn on_finished(&self, report: &Report) {
            self.finished.lock().unwrap().push(report.clone());
        }
    }

    #[test]
    fn observer_sees_every_outcome_in_order() {
        let obs = Recording::default();
        let r = aggregate_with(&tokens(vec![10.into(), true.into(), "x".into()]), &obs);

        let outcomes = obs.outcomes.lock().unwrap().clone();
        assert_eq!(
            outcomes,
            vec![
                (0, Classified::Valid(10.0)),
                (1, Classified::Invalid(InvalidReason::UnsupportedType("bool"))),
                (2, Classified::Invalid(InvalidReason::NotANumber)),
            ]
        );
        assert_eq!(obs.finished.lock().unwrap().clone(), vec![r]);
    }

    #[test]
    fn observer_is_told_about_empty_runs() {
        let obs = Recording::default();
        let r = aggregate_with(&[], &obs);
        assert!(obs.outcomes.lock().unwrap().is_empty());
        assert_eq!(obs.finished.lock().unwrap().clone(), vec![r]);
    }

    #[test]
    fn report_serializes_with_null_mean() {
        let json = serde_json::to_value(aggregate(&[])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total": 0.0,
                "valid_count": 0,
                "invalid_count": 0,
                "mean": null,
                "message": NO_VALID_DATA,
            })
        );
    }
}
