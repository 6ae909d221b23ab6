use pretty_assertions::assert_eq;
use shared_types::{
    AppErrorKind, AttendanceGrid, AttendanceStatus, CreateSheetRequest, Month, RecordUpdate,
};
use crate::common::{self, TOKEN};

const SESSION: i64 = 7;

fn february_2024() -> CreateSheetRequest {
    CreateSheetRequest {
        month: Month::new(2).unwrap(),
        year: 2024,
    }
}

#[tokio::test]
async fn test_create_sheet_prefills_absent_records() {
    let (api, state) = common::fake_school(common::school_with_roster(SESSION)).await;
    let api = api.with_token(TOKEN);

    let sheet_id = api.create_sheet(SESSION, &february_2024()).await.unwrap();
    let sheet = api.get_sheet(sheet_id).await.unwrap();

    // Two students, 29 days in February 2024.
    assert_eq!(sheet.records.len(), 58);
    assert!(sheet.records.iter().all(|r| r.status == AttendanceStatus::Absent));
    assert_eq!(state.lock().await.sheets.len(), 1);
}

#[tokio::test]
async fn test_second_sheet_for_the_same_month_conflicts() {
    let (api, state) = common::fake_school(common::school_with_roster(SESSION)).await;
    api.create_sheet(SESSION, &february_2024()).await.unwrap();

    let err = api.create_sheet(SESSION, &february_2024()).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Conflict);
    assert!(err.message.contains("February 2024"));
    assert_eq!(state.lock().await.sheets.len(), 1);
}

#[tokio::test]
async fn test_sheet_before_2000_is_rejected_locally() {
    let (api, state) = common::fake_school(common::school_with_roster(SESSION)).await;
    let req = CreateSheetRequest {
        month: Month::new(1).unwrap(),
        year: 1999,
    };
    let err = api.create_sheet(SESSION, &req).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(state.lock().await.sheets.is_empty());
}

#[tokio::test]
async fn test_grid_edits_are_saved_in_one_batch() {
    let (api, state) = common::fake_school(common::school_with_roster(SESSION)).await;
    let sheet_id = api.create_sheet(SESSION, &february_2024()).await.unwrap();

    let (sheet, roster) = tokio::try_join!(api.get_sheet(sheet_id), api.session_roster(SESSION)).unwrap();
    let mut grid = AttendanceGrid::build(&sheet, &roster);
    assert_eq!(grid.toggle(1, 5).unwrap(), AttendanceStatus::Present);
    assert_eq!(grid.toggle(2, 29).unwrap(), AttendanceStatus::Present);
    assert_eq!(grid.participant_hours(), 6);

    let payload = grid.save_payload();
    assert_eq!(payload.len(), 58);
    api.save_sheet(sheet_id, &payload).await.unwrap();

    let state = state.lock().await;
    let stored = state.sheet(sheet_id).unwrap();
    let present: Vec<(i64, &str)> = stored
        .records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .map(|r| (r.student_id, r.date.as_str()))
        .collect();
    assert_eq!(present, vec![(1, "2024-02-05"), (2, "2024-02-29")]);
}

#[tokio::test]
async fn test_foreign_record_rejects_the_whole_batch() {
    let (api, state) = common::fake_school(common::school_with_roster(SESSION)).await;
    let sheet_id = api.create_sheet(SESSION, &february_2024()).await.unwrap();
    let first = api.get_sheet(sheet_id).await.unwrap().records[0].id;

    let updates = [
        RecordUpdate { id: first, status: AttendanceStatus::Present },
        RecordUpdate { id: 999_999, status: AttendanceStatus::Present },
    ];
    let err = api.save_sheet(sheet_id, &updates).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);

    let state = state.lock().await;
    assert!(state
        .sheet(sheet_id)
        .unwrap()
        .records
        .iter()
        .all(|r| r.status == AttendanceStatus::Absent));
}

#[tokio::test]
async fn test_missing_sheet_is_not_found() {
    let (api, _state) = common::fake_school(common::school_with_roster(SESSION)).await;
    let err = api.get_sheet(4242).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Not Found");
}

#[tokio::test]
async fn test_deleted_sheet_leaves_the_list() {
    let (api, _state) = common::fake_school(common::school_with_roster(SESSION)).await;
    let sheet_id = api.create_sheet(SESSION, &february_2024()).await.unwrap();
    assert_eq!(api.list_sheets(SESSION).await.unwrap().len(), 1);

    api.delete_sheet(sheet_id).await.unwrap();
    assert!(api.list_sheets(SESSION).await.unwrap().is_empty());
}
