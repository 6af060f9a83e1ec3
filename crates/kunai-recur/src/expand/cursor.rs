//! The occurrence cursor: lazy, forward-only expansion of one rule.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use kunai_core::CalendarDate;

use crate::expand::generator::{self, Period};
use crate::expand::validator;
use crate::rule::Recur;

/// Lazily yields the occurrences of a rule from a start date.
///
/// Obtained from [`Recur::occurrences`]. The cursor owns all expansion
/// state: the rule itself stays immutable and may back any number of
/// cursors at once. Iteration is forward-only and non-restartable; to
/// iterate again, build a fresh cursor. Exhaustion is sticky and the
/// iterator is fused.
///
/// Emitted occurrences are strictly increasing, never earlier than the
/// start date, and never later than the rule's `until` bound; once `count`
/// occurrences have been emitted the cursor stays exhausted. A rule with
/// neither bound and filters that can never match iterates forever, like
/// any other unbounded iterator that the caller must limit.
#[derive(Debug, Clone)]
pub struct Occurrences<'r, D: CalendarDate> {
    rule: &'r Recur<D>,
    start: D,
    /// The date the next period expands around; `None` once stepping left
    /// the representable range.
    anchor: Option<D>,
    /// Candidates awaiting validation, oldest first.
    pending: VecDeque<D>,
    last_emitted: Option<D>,
    emitted: u32,
    exhausted: bool,
}

impl<'r, D: CalendarDate> Occurrences<'r, D> {
    pub(crate) fn new(rule: &'r Recur<D>, start: D) -> Self {
        Self {
            rule,
            anchor: Some(start.clone()),
            start,
            pending: VecDeque::new(),
            last_emitted: None,
            emitted: 0,
            exhausted: false,
        }
    }

    fn exhaust(&mut self) -> Option<D> {
        self.exhausted = true;
        self.pending.clear();
        tracing::trace!(emitted = self.emitted, "Recurrence cursor exhausted");
        None
    }

    /// Refills the pending queue from the next period and advances the
    /// anchor. Returns `false` when no further period can produce a date
    /// within bounds.
    fn refill(&mut self) -> bool {
        let Some(anchor) = self.anchor.clone() else {
            return false;
        };
        if let Some(until) = self.rule.until()
            && generator::period_floor(self.rule, &anchor) > *until
        {
            return false;
        }
        let Period {
            candidates,
            next_anchor,
        } = generator::expand_period(self.rule, &anchor, &self.start);
        tracing::trace!(count = candidates.len(), "Expanded recurrence period");
        self.pending.extend(candidates);
        self.anchor = next_anchor;
        true
    }
}

impl<D: CalendarDate> Iterator for Occurrences<'_, D> {
    type Item = D;

    fn next(&mut self) -> Option<D> {
        if self.exhausted {
            return None;
        }
        loop {
            if let Some(count) = self.rule.count()
                && self.emitted >= count
            {
                return self.exhaust();
            }

            let Some(candidate) = self.pending.pop_front() else {
                if self.refill() {
                    continue;
                }
                return self.exhaust();
            };

            // Candidates below the start date, or not past the last
            // occurrence, are discarded without ending the sequence.
            if candidate < self.start
                || self
                    .last_emitted
                    .as_ref()
                    .is_some_and(|last| candidate <= *last)
            {
                continue;
            }

            if let Some(until) = self.rule.until()
                && candidate > *until
            {
                return self.exhaust();
            }

            if validator::validate(self.rule, &candidate) {
                self.emitted += 1;
                self.last_emitted = Some(candidate.clone());
                return Some(candidate);
            }
        }
    }
}

impl<D: CalendarDate> FusedIterator for Occurrences<'_, D> {}
