use cablewatch_core::severity::AlertSeverity;
use cablewatch_core::snapshot::{diff_snapshots, CableRecord};
use cablewatch_core::status::{MasterStatus, WorkStatus};
use cablewatch_db::models::snapshot::{CreateSnapshot, CreateStatusConflict, IngestPlan};
use cablewatch_db::repositories::{
    SnapshotRepo, StatusConflictRepo, TransitionEventRepo, WorksiteRepo,
};
use sqlx::PgPool;

fn diff_only(previous: &[CableRecord], next: &[CableRecord]) -> IngestPlan {
    IngestPlan {
        events: diff_snapshots(previous, next),
        conflicts: Vec::new(),
    }
}

fn input(worksite_id: i64, records: Vec<CableRecord>) -> CreateSnapshot {
    CreateSnapshot {
        worksite_id,
        source_label: "import.xlsx".to_string(),
        records,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn versions_increase_and_highest_is_active(pool: PgPool) {
    let site = WorksiteRepo::create(&pool, "Cantiere Nord").await.unwrap();

    let first = SnapshotRepo::ingest(
        &pool,
        &input(site.id, vec![CableRecord::new("x", WorkStatus::Posato)]),
        diff_only,
    )
    .await
    .unwrap();
    assert_eq!(first.snapshot.version, 1);
    assert_eq!(first.events.len(), 1);
    assert_eq!(first.events[0].change_type, "NEW_ENTITY");
    assert_eq!(first.events[0].code, "X");

    let second = SnapshotRepo::ingest(&pool, &input(site.id, vec![]), diff_only)
        .await
        .unwrap();
    assert_eq!(second.snapshot.version, 2);
    assert_eq!(second.events.len(), 1);
    assert_eq!(second.events[0].change_type, "DISAPPEARED_UNEXPECTED");
    assert_eq!(second.events[0].severity, "BLOCK");
    assert_eq!(second.events[0].old_status.as_deref(), Some("Posato"));

    let active = SnapshotRepo::find_active(&pool, site.id).await.unwrap().unwrap();
    assert_eq!(active.id, second.snapshot.id);

    // The superseded version is untouched.
    let records = SnapshotRepo::list_records(&pool, first.snapshot.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        SnapshotRepo::list_for_worksite(&pool, site.id).await.unwrap().len(),
        2
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn worksites_have_independent_versions(pool: PgPool) {
    let a = WorksiteRepo::create(&pool, "A").await.unwrap();
    let b = WorksiteRepo::create(&pool, "B").await.unwrap();

    SnapshotRepo::ingest(&pool, &input(a.id, vec![]), diff_only).await.unwrap();
    SnapshotRepo::ingest(&pool, &input(a.id, vec![]), diff_only).await.unwrap();
    let first_b = SnapshotRepo::ingest(&pool, &input(b.id, vec![]), diff_only)
        .await
        .unwrap();
    assert_eq!(first_b.snapshot.version, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_ingestions_get_distinct_versions(pool: PgPool) {
    let site = WorksiteRepo::create(&pool, "Cantiere").await.unwrap();

    let left_input = input(site.id, vec![]);
    let right_input = input(site.id, vec![]);
    let (left, right) = tokio::join!(
        SnapshotRepo::ingest(&pool, &left_input, diff_only),
        SnapshotRepo::ingest(&pool, &right_input, diff_only),
    );
    let mut versions = vec![left.unwrap().snapshot.version, right.unwrap().snapshot.version];
    versions.sort_unstable();
    assert_eq!(versions, vec![1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn conflicts_are_stored_with_the_snapshot(pool: PgPool) {
    let site = WorksiteRepo::create(&pool, "Cantiere").await.unwrap();
    let plan = |_: &[CableRecord], _: &[CableRecord]| IngestPlan {
        events: Vec::new(),
        conflicts: vec![CreateStatusConflict {
            code: "C1".to_string(),
            master_status: MasterStatus::Posato,
            operational_status: MasterStatus::NonPosato,
            is_conflict: true,
            is_changed: true,
            severity: AlertSeverity::Critical,
        }],
    };

    let ingested = SnapshotRepo::ingest(&pool, &input(site.id, vec![]), plan)
        .await
        .unwrap();
    assert_eq!(ingested.conflicts.len(), 1);

    let open = StatusConflictRepo::list_open_conflicts(&pool, ingested.snapshot.id)
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].master_status, "Posato");
    assert_eq!(open[0].severity, "CRITICAL");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transition_events_reject_update(pool: PgPool) {
    let site = WorksiteRepo::create(&pool, "Cantiere").await.unwrap();
    let ingested = SnapshotRepo::ingest(
        &pool,
        &input(site.id, vec![CableRecord::new("A1", WorkStatus::Libero)]),
        diff_only,
    )
    .await
    .unwrap();

    let result =
        sqlx::query("UPDATE transition_events SET severity = 'INFO' WHERE snapshot_id = $1")
            .bind(ingested.snapshot.id)
            .execute(&pool)
            .await;
    assert!(result.is_err());

    let result = sqlx::query("DELETE FROM snapshots WHERE id = $1")
        .bind(ingested.snapshot.id)
        .execute(&pool)
        .await;
    assert!(result.is_err());

    let events = TransitionEventRepo::list_for_snapshot(&pool, ingested.snapshot.id)
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_codes_violate_the_unique_constraint(pool: PgPool) {
    let site = WorksiteRepo::create(&pool, "Cantiere").await.unwrap();
    let records = vec![
        CableRecord::new("a1", WorkStatus::Libero),
        CableRecord::new(" A1 ", WorkStatus::Posato),
    ];
    let err = SnapshotRepo::ingest(&pool, &input(site.id, records), diff_only)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert!(SnapshotRepo::find_active(&pool, site.id).await.unwrap().is_none());
}
