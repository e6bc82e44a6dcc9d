//! Repository for `submissions` and their rows, lengths, and files.

use cablewatch_core::types::DbId;
use cablewatch_core::validation::submission::Submission;
use sqlx::PgPool;

use crate::models::submission::{
    CreateSubmission, SubmissionFileRow, SubmissionHeaderRow, SubmissionLengthRow,
    SubmissionRowRecord,
};

/// Column list for `submissions` queries.
const HEADER_COLUMNS: &str = "id, worksite_id, commessa_id, status, report_date, crew_role, \
    produced_total, note, validated_at, approved_at, returned_at, archive_file_id, \
    created_at, updated_at";

/// Column list for `submission_rows` queries.
const ROW_COLUMNS: &str = "id, submission_id, position, category, description, workers, \
    time_text, planned_text, produced_text, note, catalog_item_id";

const LENGTH_COLUMNS: &str = "id, submission_id, cable_id, planned_length, executed_length";

const FILE_COLUMNS: &str = "id, submission_id, kind, deleted_at";

/// Loads submissions for evaluation.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a submission with all of its children in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubmission,
    ) -> Result<SubmissionHeaderRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO submissions \
                (worksite_id, commessa_id, status, report_date, crew_role, produced_total, \
                 note, returned_at, archive_file_id) \
             VALUES ($1, $2, COALESCE($3, 'DRAFT'), $4, $5, $6, $7, $8, $9) \
             RETURNING {HEADER_COLUMNS}"
        );
        let header = sqlx::query_as::<_, SubmissionHeaderRow>(&query)
            .bind(input.worksite_id)
            .bind(input.commessa_id)
            .bind(&input.status)
            .bind(input.report_date)
            .bind(&input.crew_role)
            .bind(input.produced_total)
            .bind(&input.note)
            .bind(input.returned_at)
            .bind(input.archive_file_id)
            .fetch_one(&mut *tx)
            .await?;

        for row in &input.rows {
            sqlx::query(
                "INSERT INTO submission_rows \
                    (submission_id, position, category, description, workers, time_text, \
                     planned_text, produced_text, note, catalog_item_id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(header.id)
            .bind(row.position)
            .bind(&row.category)
            .bind(&row.description)
            .bind(&row.workers)
            .bind(&row.time_text)
            .bind(&row.planned_text)
            .bind(&row.produced_text)
            .bind(&row.note)
            .bind(row.catalog_item_id)
            .execute(&mut *tx)
            .await?;
        }

        for length in &input.lengths {
            sqlx::query(
                "INSERT INTO submission_lengths \
                    (submission_id, cable_id, planned_length, executed_length) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(header.id)
            .bind(length.cable_id)
            .bind(length.planned_length)
            .bind(length.executed_length)
            .execute(&mut *tx)
            .await?;
        }

        for file in &input.files {
            sqlx::query(
                "INSERT INTO submission_files (submission_id, kind, deleted_at) \
                 VALUES ($1, $2, $3)",
            )
            .bind(header.id)
            .bind(file.kind.as_str())
            .bind(file.deleted_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(header)
    }

    /// Find a submission header by its internal ID.
    pub async fn find_header(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubmissionHeaderRow>, sqlx::Error> {
        let query = format!("SELECT {HEADER_COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, SubmissionHeaderRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Activity rows in report order.
    pub async fn list_rows(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<SubmissionRowRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {ROW_COLUMNS} FROM submission_rows \
             WHERE submission_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, SubmissionRowRecord>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_lengths(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<SubmissionLengthRow>, sqlx::Error> {
        let query = format!(
            "SELECT {LENGTH_COLUMNS} FROM submission_lengths \
             WHERE submission_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, SubmissionLengthRow>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    /// All attached files, soft-deleted ones included.
    pub async fn list_files(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<SubmissionFileRow>, sqlx::Error> {
        let query = format!(
            "SELECT {FILE_COLUMNS} FROM submission_files \
             WHERE submission_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, SubmissionFileRow>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    /// Load the full evaluation input: header first, then rows, lengths,
    /// and files. Returns `None` if the header does not exist.
    pub async fn load(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let Some(header) = Self::find_header(pool, id).await? else {
            return Ok(None);
        };
        let rows = Self::list_rows(pool, id).await?;
        let lengths = Self::list_lengths(pool, id).await?;
        let files = Self::list_files(pool, id).await?;

        Ok(Some(Submission {
            header: header.into(),
            rows: rows.into_iter().map(Into::into).collect(),
            lengths: lengths.into_iter().map(Into::into).collect(),
            files: files
                .into_iter()
                .filter_map(|f| {
                    let (file_id, kind) = (f.id, f.kind.clone());
                    let file = f.into_file();
                    if file.is_none() {
                        tracing::warn!(
                            submission_id = id,
                            file_id,
                            kind = %kind,
                            "Ignoring file of unknown kind"
                        );
                    }
                    file
                })
                .collect(),
        }))
    }
}
