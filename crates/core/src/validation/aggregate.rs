//! Hit-to-signal aggregation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::types::DbId;
use crate::validation::rules::{RawHit, MAX_SAMPLE_LIMIT};

/// Evidence carried by one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    pub hit_count: usize,
    pub affected_row_count: usize,
    pub row_positions: Vec<i32>,
    /// First raw payloads, at most `sample_limit` of them.
    pub sample: Vec<serde_json::Value>,
    pub sample_truncated: bool,
}

/// All hits for one rule code, collapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub code: String,
    pub severity: Severity,
    /// Union of the row ids of every contributing hit, ascending.
    pub row_ids: Vec<DbId>,
    pub payload: SignalPayload,
}

#[derive(Default)]
struct Group<'a> {
    severity: Option<Severity>,
    rows: BTreeMap<DbId, i32>,
    payloads: Vec<&'a serde_json::Value>,
}

/// Group `hits` by code.
///
/// The severity of a signal is the maximum over its hits and its row ids are
/// the full union. Sampling bounds only the raw payloads kept as evidence,
/// and never keeps more than [`MAX_SAMPLE_LIMIT`] of them.
/// Signals are ordered by descending severity, then ascending code.
pub fn aggregate_hits(hits: &[RawHit], sample_limit: usize) -> Vec<Signal> {
    let sample_limit = sample_limit.min(MAX_SAMPLE_LIMIT);
    let mut groups: BTreeMap<&str, Group<'_>> = BTreeMap::new();
    for hit in hits {
        let group = groups.entry(hit.code).or_default();
        group.severity = group.severity.max(Some(hit.severity));
        for row in &hit.rows {
            group.rows.insert(row.id, row.position);
        }
        group.payloads.push(&hit.payload);
    }

    let mut signals: Vec<Signal> = groups
        .into_iter()
        .filter_map(|(code, group)| {
            let severity = group.severity?;
            let positions: BTreeSet<i32> = group.rows.values().copied().collect();
            Some(Signal {
                code: code.to_string(),
                severity,
                row_ids: group.rows.keys().copied().collect(),
                payload: SignalPayload {
                    hit_count: group.payloads.len(),
                    affected_row_count: group.rows.len(),
                    row_positions: positions.into_iter().collect(),
                    sample: group
                        .payloads
                        .iter()
                        .take(sample_limit)
                        .map(|p| (*p).clone())
                        .collect(),
                    sample_truncated: group.payloads.len() > sample_limit,
                },
            })
        })
        .collect();

    signals.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.code.cmp(&b.code)));
    signals
}

/// Number of distinct codes whose aggregated severity equals `severity`.
pub fn count_codes_at(signals: &[Signal], severity: Severity) -> usize {
    signals
        .iter()
        .filter(|s| s.severity == severity)
        .map(|s| s.code.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::RowRef;
    use serde_json::json;

    fn hit(code: &'static str, severity: Severity, rows: &[(DbId, i32)]) -> RawHit {
        RawHit {
            code,
            severity,
            rows: rows
                .iter()
                .map(|&(id, position)| RowRef { id, position })
                .collect(),
            payload: json!({ "rows": rows.len() }),
        }
    }

    #[test]
    fn severity_is_max_and_rows_are_union() {
        let hits = vec![
            hit("X", Severity::Info, &[(1, 1)]),
            hit("X", Severity::Warn, &[(2, 2), (1, 1)]),
            hit("X", Severity::Block, &[(7, 5)]),
        ];
        let signals = aggregate_hits(&hits, 20);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].severity, Severity::Block);
        assert_eq!(signals[0].row_ids, vec![1, 2, 7]);
        assert_eq!(signals[0].payload.hit_count, 3);
        assert_eq!(signals[0].payload.affected_row_count, 3);
        assert_eq!(signals[0].payload.row_positions, vec![1, 2, 5]);
    }

    #[test]
    fn sampling_keeps_every_row_id() {
        let hits: Vec<RawHit> = (1..=30)
            .map(|i| hit("X", Severity::Warn, &[(i, i as i32)]))
            .collect();
        let signals = aggregate_hits(&hits, 5);
        assert_eq!(signals[0].payload.sample.len(), 5);
        assert!(signals[0].payload.sample_truncated);
        assert_eq!(signals[0].row_ids.len(), 30);
    }

    #[test]
    fn oversized_limit_still_keeps_at_most_twenty_samples() {
        let hits: Vec<RawHit> = (1..=30)
            .map(|i| hit("X", Severity::Block, &[(i, i as i32)]))
            .collect();
        let signals = aggregate_hits(&hits, 1000);
        assert_eq!(signals[0].payload.sample.len(), MAX_SAMPLE_LIMIT);
        assert!(signals[0].payload.sample_truncated);
        assert_eq!(signals[0].row_ids.len(), 30);
    }

    #[test]
    fn ordered_by_severity_then_code() {
        let hits = vec![
            hit("B_INFO", Severity::Info, &[]),
            hit("Z_BLOCK", Severity::Block, &[]),
            hit("A_WARN", Severity::Warn, &[]),
            hit("A_BLOCK", Severity::Block, &[]),
        ];
        let codes: Vec<String> = aggregate_hits(&hits, 20).into_iter().map(|s| s.code).collect();
        assert_eq!(codes, vec!["A_BLOCK", "Z_BLOCK", "A_WARN", "B_INFO"]);
    }

    #[test]
    fn counts_distinct_codes_not_hits() {
        let hits = vec![
            hit("W1", Severity::Warn, &[(1, 1)]),
            hit("W1", Severity::Warn, &[(2, 2)]),
            hit("W1", Severity::Warn, &[(3, 3)]),
            hit("W2", Severity::Warn, &[(1, 1)]),
        ];
        let signals = aggregate_hits(&hits, 20);
        assert_eq!(count_codes_at(&signals, Severity::Warn), 2);
        assert_eq!(count_codes_at(&signals, Severity::Block), 0);
    }

    #[test]
    fn no_hits_no_signals() {
        assert!(aggregate_hits(&[], 20).is_empty());
    }
}
