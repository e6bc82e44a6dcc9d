//! Rule checks.
//!
//! Phase 1 checks ([`CollectCheck`]) look only at the submission. Phase 2
//! checks ([`DeriveCheck`]) additionally receive every phase-1 hit and run
//! strictly after them. A [`CheckPlan`] pairs each check with the severity
//! configured for it in the [`RuleCatalog`]; disabled rules are left out of
//! the plan.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;

use crate::severity::Severity;
use crate::types::DbId;
use crate::validation::parse::{is_blank, parse_hours};
use crate::validation::rules::*;
use crate::validation::submission::{Submission, SubmissionRow, SUBMISSION_STATUS_RETURNED};

/// What every check sees.
pub struct EvalContext<'a> {
    pub submission: &'a Submission,
    pub scope: EvaluationScope,
    pub catalog: &'a RuleCatalog,
}

impl EvalContext<'_> {
    fn scope_rule(&self) -> Option<&ScopeRule> {
        self.catalog.scope_rule(self.scope)
    }
}

/// Phase 1: independent checks over the submission.
pub trait CollectCheck: Send + Sync {
    fn code(&self) -> &'static str;
    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>);
}

/// Phase 2: checks derived from the phase-1 hits.
pub trait DeriveCheck: Send + Sync {
    fn code(&self) -> &'static str;
    fn derive(
        &self,
        ctx: &EvalContext<'_>,
        collected: &[RawHit],
        severity: Severity,
        hits: &mut Vec<RawHit>,
    );
}

fn row_ref(row: &SubmissionRow) -> RowRef {
    RowRef {
        id: row.id,
        position: row.position,
    }
}

fn row_hit(
    code: &'static str,
    severity: Severity,
    row: &SubmissionRow,
    payload: serde_json::Value,
) -> RawHit {
    RawHit {
        code,
        severity,
        rows: vec![row_ref(row)],
        payload,
    }
}

fn header_hit(code: &'static str, severity: Severity, payload: serde_json::Value) -> RawHit {
    RawHit {
        code,
        severity,
        rows: Vec::new(),
        payload,
    }
}

// ---------------------------------------------------------------------------
// Quantities
// ---------------------------------------------------------------------------

pub struct PlannedZeroProducedPositive;

impl CollectCheck for PlannedZeroProducedPositive {
    fn code(&self) -> &'static str {
        MISMATCH_PREVISTO0_PRODOTTO_POS
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        for row in &ctx.submission.rows {
            if let (Some(planned), Some(produced)) = (row.planned, row.produced) {
                if planned == 0.0 && produced > 0.0 {
                    hits.push(row_hit(
                        self.code(),
                        severity,
                        row,
                        json!({
                            "position": row.position,
                            "previsto": planned,
                            "prodotto": produced,
                        }),
                    ));
                }
            }
        }
    }
}

pub struct PlannedPositiveProducedZero;

impl CollectCheck for PlannedPositiveProducedZero {
    fn code(&self) -> &'static str {
        MISMATCH_PREVISTO_POS_PRODOTTO0
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        for row in &ctx.submission.rows {
            let Some(planned) = row.planned else { continue };
            if planned > 0.0 && row.produced.map_or(true, |p| p == 0.0) {
                hits.push(row_hit(
                    self.code(),
                    severity,
                    row,
                    json!({
                        "position": row.position,
                        "previsto": planned,
                        "prodotto": row.produced,
                    }),
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

pub struct TimeMissingOrUnparseable;

impl CollectCheck for TimeMissingOrUnparseable {
    fn code(&self) -> &'static str {
        TIME_MISSING_OR_UNPARSEABLE
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        for row in &ctx.submission.rows {
            if is_blank(row.description.as_deref()) {
                continue;
            }
            if row.time.as_deref().and_then(parse_hours).is_none() {
                hits.push(row_hit(
                    self.code(),
                    severity,
                    row,
                    json!({ "position": row.position, "tempo": row.time }),
                ));
            }
        }
    }
}

pub struct TimeOutOfRange;

impl CollectCheck for TimeOutOfRange {
    fn code(&self) -> &'static str {
        TIME_OUT_OF_RANGE
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        let max = ctx.catalog.max_hours;
        for row in &ctx.submission.rows {
            let Some(hours) = row.time.as_deref().and_then(parse_hours) else {
                continue;
            };
            if !(0.0..=max).contains(&hours) {
                hits.push(row_hit(
                    self.code(),
                    severity,
                    row,
                    json!({
                        "position": row.position,
                        "tempo": row.time,
                        "hours": hours,
                        "max_hours": max,
                    }),
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

pub struct MissingOperators;

impl CollectCheck for MissingOperators {
    fn code(&self) -> &'static str {
        MISSING_OPERATORS
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        for row in &ctx.submission.rows {
            let has_content =
                !is_blank(row.category.as_deref()) || !is_blank(row.description.as_deref());
            if has_content && is_blank(row.workers.as_deref()) {
                hits.push(row_hit(
                    self.code(),
                    severity,
                    row,
                    json!({ "position": row.position, "categoria": row.category }),
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Duplicates
// ---------------------------------------------------------------------------

pub struct DuplicateRows;

impl DuplicateRows {
    fn fingerprint_parts(row: &SubmissionRow) -> [String; 6] {
        fn text(value: &Option<String>) -> String {
            value.as_deref().unwrap_or("").trim().to_lowercase()
        }
        fn number(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        [
            text(&row.category),
            text(&row.description),
            number(row.planned),
            number(row.produced),
            text(&row.time),
            text(&row.workers),
        ]
    }

    /// Case-insensitive fingerprint of the fields that identify an activity.
    pub fn fingerprint(row: &SubmissionRow) -> String {
        Self::fingerprint_parts(row).join("|")
    }
}

impl CollectCheck for DuplicateRows {
    fn code(&self) -> &'static str {
        POSSIBLE_DUP_ROW
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        let mut groups: BTreeMap<String, Vec<&SubmissionRow>> = BTreeMap::new();
        for row in &ctx.submission.rows {
            let parts = Self::fingerprint_parts(row);
            // Blank placeholder rows.
            if parts.iter().all(String::is_empty) {
                continue;
            }
            groups.entry(parts.join("|")).or_default().push(row);
        }

        for members in groups.into_values().filter(|m| m.len() >= 2) {
            let mut rows: Vec<RowRef> = members.iter().map(|r| row_ref(r)).collect();
            rows.sort_by_key(|r| (r.position, r.id));
            let positions: Vec<i32> = rows.iter().map(|r| r.position).collect();
            hits.push(RawHit {
                code: self.code(),
                severity,
                payload: json!({ "count": rows.len(), "positions": positions }),
                rows,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Header and scope
// ---------------------------------------------------------------------------

pub struct StatusScopeMismatch;

impl CollectCheck for StatusScopeMismatch {
    fn code(&self) -> &'static str {
        STATUS_SCOPE_MISMATCH
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        let Some(rule) = ctx.scope_rule() else { return };
        let header = &ctx.submission.header;
        if !header.status_is(&rule.expected_status) {
            hits.push(header_hit(
                self.code(),
                severity,
                json!({
                    "scope": ctx.scope,
                    "status": header.status,
                    "expected": rule.expected_status,
                }),
            ));
        }
    }
}

pub struct MissingArchiveCopy;

impl CollectCheck for MissingArchiveCopy {
    fn code(&self) -> &'static str {
        MISSING_ARCHIVE_COPY
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        let required = ctx.scope_rule().is_some_and(|r| r.requires_archive_copy);
        if required && !ctx.submission.has_archive_copy() {
            hits.push(header_hit(self.code(), severity, json!({ "scope": ctx.scope })));
        }
    }
}

pub struct MissingEvidenceFiles;

impl CollectCheck for MissingEvidenceFiles {
    fn code(&self) -> &'static str {
        MISSING_EVIDENCE_FILES
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        let required = ctx.scope_rule().is_some_and(|r| r.requires_evidence);
        if required && ctx.submission.active_evidence_count() == 0 {
            hits.push(header_hit(self.code(), severity, json!({ "scope": ctx.scope })));
        }
    }
}

pub struct ReturnedMissingTimestamp;

impl CollectCheck for ReturnedMissingTimestamp {
    fn code(&self) -> &'static str {
        RETURNED_MISSING_TIMESTAMP
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        let header = &ctx.submission.header;
        if header.status_is(SUBMISSION_STATUS_RETURNED) && header.returned_at.is_none() {
            hits.push(header_hit(
                self.code(),
                severity,
                json!({ "status": header.status }),
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Lengths
// ---------------------------------------------------------------------------

pub struct LengthExecutedExceedsPlanned;

impl CollectCheck for LengthExecutedExceedsPlanned {
    fn code(&self) -> &'static str {
        LENGTH_EXECUTED_EXCEEDS_PLANNED
    }

    fn collect(&self, ctx: &EvalContext<'_>, severity: Severity, hits: &mut Vec<RawHit>) {
        for length in &ctx.submission.lengths {
            if let (Some(planned), Some(executed)) = (length.planned_length, length.executed_length)
            {
                if executed > planned {
                    hits.push(header_hit(
                        self.code(),
                        severity,
                        json!({
                            "length_id": length.id,
                            "cable_id": length.cable_id,
                            "planned": planned,
                            "executed": executed,
                        }),
                    ));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Phase 2
// ---------------------------------------------------------------------------

/// Rows that already carry a WARN or BLOCK hit must explain themselves.
pub struct MissingNoteForAnomaly;

impl DeriveCheck for MissingNoteForAnomaly {
    fn code(&self) -> &'static str {
        MISSING_NOTE_FOR_ANOMALY
    }

    fn derive(
        &self,
        ctx: &EvalContext<'_>,
        collected: &[RawHit],
        severity: Severity,
        hits: &mut Vec<RawHit>,
    ) {
        let mut triggers: BTreeMap<DbId, BTreeSet<&'static str>> = BTreeMap::new();
        for hit in collected.iter().filter(|h| h.severity >= Severity::Warn) {
            for row in &hit.rows {
                triggers.entry(row.id).or_default().insert(hit.code);
            }
        }

        for row in &ctx.submission.rows {
            let Some(codes) = triggers.get(&row.id) else { continue };
            if is_blank(row.note.as_deref()) {
                hits.push(row_hit(
                    self.code(),
                    severity,
                    row,
                    json!({ "position": row.position, "triggered_by": codes }),
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Checks selected and configured from a catalog, grouped by phase.
pub struct CheckPlan {
    collect: Vec<(Box<dyn CollectCheck>, Severity)>,
    derive: Vec<(Box<dyn DeriveCheck>, Severity)>,
}

impl CheckPlan {
    /// Build the plan for `catalog`. Checks whose rule is disabled or
    /// missing from the catalog are not scheduled.
    pub fn from_catalog(catalog: &RuleCatalog) -> Self {
        let collect: Vec<Box<dyn CollectCheck>> = vec![
            Box::new(PlannedZeroProducedPositive),
            Box::new(PlannedPositiveProducedZero),
            Box::new(TimeMissingOrUnparseable),
            Box::new(TimeOutOfRange),
            Box::new(MissingOperators),
            Box::new(DuplicateRows),
            Box::new(StatusScopeMismatch),
            Box::new(MissingArchiveCopy),
            Box::new(MissingEvidenceFiles),
            Box::new(LengthExecutedExceedsPlanned),
            Box::new(ReturnedMissingTimestamp),
        ];
        let derive: Vec<Box<dyn DeriveCheck>> = vec![Box::new(MissingNoteForAnomaly)];

        Self {
            collect: collect
                .into_iter()
                .filter_map(|c| catalog.severity_of(c.code()).map(|s| (c, s)))
                .collect(),
            derive: derive
                .into_iter()
                .filter_map(|c| catalog.severity_of(c.code()).map(|s| (c, s)))
                .collect(),
        }
    }

    /// Phase 1.
    pub fn collect(&self, ctx: &EvalContext<'_>) -> Vec<RawHit> {
        let mut hits = Vec::new();
        for (check, severity) in &self.collect {
            check.collect(ctx, *severity, &mut hits);
        }
        hits
    }

    /// Phase 2, given the complete phase-1 output.
    pub fn derive(&self, ctx: &EvalContext<'_>, collected: &[RawHit]) -> Vec<RawHit> {
        let mut hits = Vec::new();
        for (check, severity) in &self.derive {
            check.derive(ctx, collected, *severity, &mut hits);
        }
        hits
    }

    /// Both phases, phase-1 hits first.
    pub fn run(&self, ctx: &EvalContext<'_>) -> Vec<RawHit> {
        let mut hits = self.collect(ctx);
        let derived = self.derive(ctx, &hits);
        hits.extend(derived);
        hits
    }

    pub fn scheduled_codes(&self) -> Vec<&'static str> {
        self.collect
            .iter()
            .map(|(c, _)| c.code())
            .chain(self.derive.iter().map(|(c, _)| c.code()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::submission::SubmissionHeader;

    fn row(id: DbId) -> SubmissionRow {
        SubmissionRow {
            id,
            position: id as i32,
            category: Some("Posa".to_string()),
            description: Some("Posa cavo".to_string()),
            workers: Some("Rossi, Bianchi".to_string()),
            time: Some("8".to_string()),
            planned: Some(100.0),
            produced: Some(100.0),
            note: None,
            catalog_item_id: None,
        }
    }

    fn submission(rows: Vec<SubmissionRow>) -> Submission {
        Submission {
            header: SubmissionHeader {
                id: 1,
                status: "DRAFT".to_string(),
                ..Default::default()
            },
            rows,
            ..Default::default()
        }
    }

    fn run_collect(
        check: &dyn CollectCheck,
        submission: &Submission,
        scope: EvaluationScope,
    ) -> Vec<RawHit> {
        let catalog = RuleCatalog::default();
        let ctx = EvalContext {
            submission,
            scope,
            catalog: &catalog,
        };
        let mut hits = Vec::new();
        check.collect(&ctx, Severity::Warn, &mut hits);
        hits
    }

    #[test]
    fn clean_row_produces_no_hits() {
        let catalog = RuleCatalog::default();
        let s = submission(vec![row(1)]);
        let ctx = EvalContext {
            submission: &s,
            scope: EvaluationScope::Submit,
            catalog: &catalog,
        };
        assert!(CheckPlan::from_catalog(&catalog).run(&ctx).is_empty());
    }

    #[test]
    fn planned_zero_with_production() {
        let mut r = row(1);
        r.planned = Some(0.0);
        r.produced = Some(5.0);
        let hits = run_collect(
            &PlannedZeroProducedPositive,
            &submission(vec![r]),
            EvaluationScope::Submit,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rows, vec![RowRef { id: 1, position: 1 }]);
    }

    #[test]
    fn planned_positive_without_production() {
        let mut missing = row(1);
        missing.produced = None;
        let mut zero = row(2);
        zero.produced = Some(0.0);
        let mut unplanned = row(3);
        unplanned.planned = None;
        unplanned.produced = None;
        let hits = run_collect(
            &PlannedPositiveProducedZero,
            &submission(vec![missing, zero, unplanned]),
            EvaluationScope::Submit,
        );
        let ids: Vec<DbId> = hits.iter().map(|h| h.rows[0].id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn time_missing_only_when_description_present() {
        let mut blank_time = row(1);
        blank_time.time = Some(" ".to_string());
        let mut garbage_time = row(2);
        garbage_time.time = Some("otto ore".to_string());
        let mut no_description = row(3);
        no_description.description = None;
        no_description.time = None;
        let hits = run_collect(
            &TimeMissingOrUnparseable,
            &submission(vec![blank_time, garbage_time, no_description]),
            EvaluationScope::Submit,
        );
        let ids: Vec<DbId> = hits.iter().map(|h| h.rows[0].id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn time_range_bounds_are_inclusive() {
        let rows: Vec<SubmissionRow> = ["0", "24", "24:01", "-0,5", "12:30"]
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let mut r = row(i as DbId + 1);
                r.time = Some(t.to_string());
                r
            })
            .collect();
        let hits = run_collect(&TimeOutOfRange, &submission(rows), EvaluationScope::Submit);
        let ids: Vec<DbId> = hits.iter().map(|h| h.rows[0].id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn missing_operators_requires_content() {
        let mut no_workers = row(1);
        no_workers.workers = Some("".to_string());
        let mut empty_row = row(2);
        empty_row.category = None;
        empty_row.description = None;
        empty_row.workers = None;
        let hits = run_collect(
            &MissingOperators,
            &submission(vec![no_workers, empty_row]),
            EvaluationScope::Submit,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rows[0].id, 1);
    }

    #[test]
    fn duplicates_form_one_hit_per_group() {
        let a = row(1);
        let mut b = row(2);
        b.description = Some("POSA CAVO ".to_string());
        let c = row(3);
        let mut other = row(4);
        other.description = Some("Collaudo".to_string());
        let hits = run_collect(
            &DuplicateRows,
            &submission(vec![a, b, c, other]),
            EvaluationScope::Submit,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rows.len(), 3);
        assert_eq!(hits[0].payload["count"], 3);
        assert_eq!(hits[0].payload["positions"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn duplicates_without_category_or_description() {
        let bare = |id: DbId| SubmissionRow {
            id,
            position: id as i32,
            workers: Some("Rossi".to_string()),
            time: Some("8".to_string()),
            planned: Some(10.0),
            produced: Some(10.0),
            ..Default::default()
        };
        let hits = run_collect(
            &DuplicateRows,
            &submission(vec![bare(1), bare(2)]),
            EvaluationScope::Submit,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rows.len(), 2);
    }

    #[test]
    fn fully_blank_rows_are_not_duplicates() {
        let blank = |id: DbId| SubmissionRow {
            id,
            position: id as i32,
            ..Default::default()
        };
        let hits = run_collect(
            &DuplicateRows,
            &submission(vec![blank(1), blank(2)]),
            EvaluationScope::Submit,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn scope_status_mismatch() {
        let s = submission(vec![]);
        assert!(run_collect(&StatusScopeMismatch, &s, EvaluationScope::Submit).is_empty());
        let hits = run_collect(&StatusScopeMismatch, &s, EvaluationScope::Review);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload["expected"], "SUBMITTED");
        assert!(hits[0].rows.is_empty());
    }

    #[test]
    fn archive_and_evidence_follow_scope_requirements() {
        let s = submission(vec![]);
        assert!(run_collect(&MissingArchiveCopy, &s, EvaluationScope::Submit).is_empty());
        assert_eq!(run_collect(&MissingArchiveCopy, &s, EvaluationScope::Review).len(), 1);
        assert!(run_collect(&MissingEvidenceFiles, &s, EvaluationScope::Review).is_empty());
        assert_eq!(run_collect(&MissingEvidenceFiles, &s, EvaluationScope::Approve).len(), 1);
    }

    #[test]
    fn returned_without_timestamp() {
        let mut s = submission(vec![]);
        s.header.status = "RETURNED".to_string();
        assert_eq!(run_collect(&ReturnedMissingTimestamp, &s, EvaluationScope::Submit).len(), 1);
        s.header.returned_at = Some(chrono::Utc::now());
        assert!(run_collect(&ReturnedMissingTimestamp, &s, EvaluationScope::Submit).is_empty());
    }

    #[test]
    fn executed_length_over_planned() {
        use crate::validation::submission::LengthRecord;
        let mut s = submission(vec![]);
        s.lengths = vec![
            LengthRecord {
                id: 1,
                cable_id: 10,
                planned_length: Some(100.0),
                executed_length: Some(120.0),
            },
            LengthRecord {
                id: 2,
                cable_id: 11,
                planned_length: Some(100.0),
                executed_length: Some(100.0),
            },
            LengthRecord {
                id: 3,
                cable_id: 12,
                planned_length: None,
                executed_length: Some(50.0),
            },
        ];
        let hits = run_collect(&LengthExecutedExceedsPlanned, &s, EvaluationScope::Submit);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload["cable_id"], 10);
    }

    #[test]
    fn derive_sees_only_warn_or_block_hits() {
        let catalog = RuleCatalog::default();
        let mut noted = row(2);
        noted.note = Some("cavo tirato due volte".to_string());
        let s = submission(vec![row(1), noted, row(3)]);
        let ctx = EvalContext {
            submission: &s,
            scope: EvaluationScope::Submit,
            catalog: &catalog,
        };
        let collected = vec![
            RawHit {
                code: TIME_OUT_OF_RANGE,
                severity: Severity::Block,
                rows: vec![RowRef { id: 1, position: 1 }],
                payload: serde_json::Value::Null,
            },
            RawHit {
                code: TIME_OUT_OF_RANGE,
                severity: Severity::Block,
                rows: vec![RowRef { id: 2, position: 2 }],
                payload: serde_json::Value::Null,
            },
            RawHit {
                code: POSSIBLE_DUP_ROW,
                severity: Severity::Info,
                rows: vec![RowRef { id: 3, position: 3 }],
                payload: serde_json::Value::Null,
            },
        ];
        let derived = CheckPlan::from_catalog(&catalog).derive(&ctx, &collected);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].code, MISSING_NOTE_FOR_ANOMALY);
        assert_eq!(derived[0].rows[0].id, 1);
        assert_eq!(derived[0].payload["triggered_by"], serde_json::json!([TIME_OUT_OF_RANGE]));
    }

    #[test]
    fn disabled_rules_are_not_scheduled() {
        let mut catalog = RuleCatalog::default();
        catalog.disable(MISSING_NOTE_FOR_ANOMALY);
        catalog.disable(POSSIBLE_DUP_ROW);
        let codes = CheckPlan::from_catalog(&catalog).scheduled_codes();
        assert_eq!(codes.len(), 10);
        assert!(!codes.contains(&MISSING_NOTE_FOR_ANOMALY));
        assert!(!codes.contains(&POSSIBLE_DUP_ROW));
    }
}
