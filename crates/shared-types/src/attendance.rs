use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::calendar::{days_in_month, parse_record_date, Month, MIN_SHEET_YEAR};
use crate::AppError;

/// Length of one class meeting, used to turn presences into participant-hours.
pub const SESSION_DURATION_HOURS: u32 = 3;

/// Attendance mark as stored by the school backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
}

impl AttendanceStatus {
    /// Next status after a click. Present flips to Absent; Absent and an
    /// empty cell both become Present.
    pub fn toggled(current: Option<Self>) -> Self {
        match current {
            Some(AttendanceStatus::Present) => AttendanceStatus::Absent,
            Some(AttendanceStatus::Absent) | None => AttendanceStatus::Present,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::Absent => "A",
        }
    }
}

/// A student enrolled in a session, as listed by the roster endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStudent {
    pub id: i64,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
}

impl RosterStudent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// One persisted attendance mark.
///
/// The date is kept as the raw string so that a single malformed record
/// does not make the whole sheet undecodable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    #[serde(rename = "id_eleve")]
    pub student_id: i64,
    #[serde(rename = "date_presence")]
    pub date: String,
    #[serde(rename = "statut")]
    pub status: AttendanceStatus,
}

/// A monthly attendance sheet with its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSheet {
    pub id: i64,
    #[serde(rename = "mois")]
    pub month: Month,
    #[serde(rename = "annee")]
    pub year: i32,
    #[serde(rename = "presences", default)]
    pub records: Vec<AttendanceRecord>,
}

/// Sheet entry in a session's sheet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSheetSummary {
    pub id: i64,
    #[serde(rename = "mois")]
    pub month: Month,
    #[serde(rename = "annee")]
    pub year: i32,
}

impl AttendanceSheetSummary {
    pub fn label(&self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }
}

/// Body for creating a sheet for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSheetRequest {
    #[serde(rename = "mois")]
    pub month: Month,
    #[serde(rename = "annee")]
    pub year: i32,
}

impl CreateSheetRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.year < MIN_SHEET_YEAR {
            return Err(AppError::field(
                "year",
                format!("Year must be {MIN_SHEET_YEAR} or later"),
            ));
        }
        Ok(())
    }
}

/// One entry of the bulk save payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub id: i64,
    #[serde(rename = "statut")]
    pub status: AttendanceStatus,
}

/// A single (student, day) position in the grid.
///
/// `record_id` is `None` for cells that have no backing record yet; such
/// cells start with no status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCell {
    pub record_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
}

impl GridCell {
    pub fn is_present(&self) -> bool {
        self.status == Some(AttendanceStatus::Present)
    }

    /// Glyph shown in the grid.
    pub fn mark(&self) -> &'static str {
        if self.is_present() {
            "✓"
        } else {
            "–"
        }
    }

    pub fn is_unsaved(&self) -> bool {
        self.record_id.is_none() && self.status.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    DayOutOfRange { day: u32, days_in_month: u32 },
    UnknownStudent(i64),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::DayOutOfRange { day, days_in_month } => {
                write!(f, "day {day} is outside 1..={days_in_month}")
            }
            GridError::UnknownStudent(id) => write!(f, "student {id} is not on this sheet"),
        }
    }
}

impl std::error::Error for GridError {}

impl From<GridError> for AppError {
    fn from(err: GridError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

/// In-memory attendance grid for one sheet: student → day-of-month → cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceGrid {
    sheet_id: i64,
    month: Month,
    year: i32,
    days: u32,
    /// Roster student ids in roster order. Only these rows are displayed
    /// and counted.
    roster: Vec<i64>,
    rows: BTreeMap<i64, BTreeMap<u32, GridCell>>,
}

impl AttendanceGrid {
    /// Index the sheet's records by (student, UTC day of month).
    ///
    /// Every roster student gets a full row of cells. Records dated outside
    /// the sheet's month, or with an unparseable date, are skipped.
    pub fn build(sheet: &AttendanceSheet, roster: &[RosterStudent]) -> Self {
        let days = days_in_month(sheet.year, sheet.month);
        let mut grid = Self {
            sheet_id: sheet.id,
            month: sheet.month,
            year: sheet.year,
            days,
            roster: roster.iter().map(|s| s.id).collect(),
            rows: BTreeMap::new(),
        };

        for student in roster {
            grid.ensure_row(student.id);
        }

        for record in &sheet.records {
            let Some(date) = parse_record_date(&record.date) else {
                tracing::warn!(
                    sheet_id = sheet.id,
                    record_id = record.id,
                    date = %record.date,
                    "skipping attendance record with unparseable date"
                );
                continue;
            };
            if date.year() != sheet.year || date.month() != sheet.month.number() {
                tracing::warn!(
                    sheet_id = sheet.id,
                    record_id = record.id,
                    %date,
                    "skipping attendance record outside the sheet's month"
                );
                continue;
            }

            let row = grid.ensure_row(record.student_id);
            row.insert(
                date.day(),
                GridCell {
                    record_id: Some(record.id),
                    status: Some(record.status),
                },
            );
        }

        grid
    }

    fn ensure_row(&mut self, student_id: i64) -> &mut BTreeMap<u32, GridCell> {
        let days = self.days;
        self.rows
            .entry(student_id)
            .or_insert_with(|| (1..=days).map(|d| (d, GridCell::default())).collect())
    }

    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of day columns.
    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn day_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.days
    }

    /// Students that have a row, in ascending id order.
    pub fn student_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.keys().copied()
    }

    /// Roster students, in roster order.
    pub fn roster_ids(&self) -> &[i64] {
        &self.roster
    }

    pub fn contains_student(&self, student_id: i64) -> bool {
        self.rows.contains_key(&student_id)
    }

    pub fn cell(&self, student_id: i64, day: u32) -> Option<GridCell> {
        self.rows.get(&student_id)?.get(&day).copied()
    }

    /// Flip one cell in memory. Returns the new status.
    pub fn toggle(&mut self, student_id: i64, day: u32) -> Result<AttendanceStatus, GridError> {
        if day == 0 || day > self.days {
            return Err(GridError::DayOutOfRange {
                day,
                days_in_month: self.days,
            });
        }
        let row = self
            .rows
            .get_mut(&student_id)
            .ok_or(GridError::UnknownStudent(student_id))?;
        let cell = row.entry(day).or_default();
        let next = AttendanceStatus::toggled(cell.status);
        cell.status = Some(next);
        Ok(next)
    }

    /// PRESENT cells for one student. Unknown students count zero.
    pub fn count_presences(&self, student_id: i64) -> u32 {
        self.rows
            .get(&student_id)
            .map(|row| row.values().filter(|c| c.is_present()).count() as u32)
            .unwrap_or(0)
    }

    /// Presences of roster students. Rows kept only for records of students
    /// who left the session are saved but not counted.
    pub fn total_presences(&self) -> u32 {
        self.roster
            .iter()
            .map(|&student_id| self.count_presences(student_id))
            .sum()
    }

    pub fn participant_hours(&self) -> u32 {
        self.total_presences() * SESSION_DURATION_HOURS
    }

    /// Bulk-update payload: every cell backed by a record, ordered by
    /// student id then day.
    pub fn save_payload(&self) -> Vec<RecordUpdate> {
        self.rows
            .values()
            .flat_map(|row| row.values())
            .filter_map(|cell| match (cell.record_id, cell.status) {
                (Some(id), Some(status)) => Some(RecordUpdate { id, status }),
                _ => None,
            })
            .collect()
    }

    /// Cells toggled in memory that have no record to save them into.
    pub fn unsaved_count(&self) -> usize {
        self.rows
            .values()
            .flat_map(|row| row.values())
            .filter(|cell| cell.is_unsaved())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn student(id: i64, last: &str, first: &str) -> RosterStudent {
        RosterStudent {
            id,
            last_name: last.to_string(),
            first_name: first.to_string(),
        }
    }

    fn record(id: i64, student_id: i64, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id,
            student_id,
            date: date.to_string(),
            status,
        }
    }

    fn sheet(month: u32, year: i32, records: Vec<AttendanceRecord>) -> AttendanceSheet {
        AttendanceSheet {
            id: 7,
            month: Month::new(month).unwrap(),
            year,
            records,
        }
    }

    #[test]
    fn column_count_matches_calendar() {
        let roster = [student(1, "Muller", "Anna")];
        assert_eq!(AttendanceGrid::build(&sheet(2, 2024, vec![]), &roster).days(), 29);
        assert_eq!(AttendanceGrid::build(&sheet(2, 2023, vec![]), &roster).days(), 28);
        assert_eq!(AttendanceGrid::build(&sheet(4, 2024, vec![]), &roster).days(), 30);
        assert_eq!(AttendanceGrid::build(&sheet(8, 2024, vec![]), &roster).days(), 31);
    }

    #[test]
    fn roster_students_without_records_get_empty_cells() {
        let grid = AttendanceGrid::build(&sheet(4, 2024, vec![]), &[student(3, "Rossi", "Luca")]);
        let cell = grid.cell(3, 12).unwrap();
        assert_eq!(cell.record_id, None);
        assert_eq!(cell.status, None);
        assert_eq!(cell.mark(), "–");
    }

    #[test]
    fn records_are_indexed_by_utc_day() {
        let records = vec![
            record(100, 1, "2024-04-05", AttendanceStatus::Present),
            record(101, 1, "2024-04-30T22:30:00-03:00", AttendanceStatus::Absent),
        ];
        let grid = AttendanceGrid::build(&sheet(4, 2024, records), &[student(1, "A", "B")]);
        assert_eq!(
            grid.cell(1, 5),
            Some(GridCell {
                record_id: Some(100),
                status: Some(AttendanceStatus::Present)
            })
        );
        // 22:30 at UTC-3 is 01:30 UTC on May 1st, so the record leaves the month.
        assert_eq!(grid.cell(1, 30).unwrap().record_id, None);
    }

    #[test]
    fn records_outside_the_month_are_not_placed() {
        let records = vec![
            record(1, 1, "2024-03-31", AttendanceStatus::Present),
            record(2, 1, "2023-04-10", AttendanceStatus::Present),
            record(3, 1, "2024-04-10", AttendanceStatus::Present),
        ];
        let grid = AttendanceGrid::build(&sheet(4, 2024, records), &[student(1, "A", "B")]);
        let placed: Vec<i64> = grid.save_payload().iter().map(|u| u.id).collect();
        assert_eq!(placed, vec![3]);
        assert_eq!(grid.count_presences(1), 1);
    }

    #[test]
    fn malformed_dates_are_skipped() {
        let records = vec![
            record(1, 1, "not-a-date", AttendanceStatus::Present),
            record(2, 1, "2024-04-02", AttendanceStatus::Absent),
        ];
        let grid = AttendanceGrid::build(&sheet(4, 2024, records), &[student(1, "A", "B")]);
        assert_eq!(grid.save_payload().len(), 1);
        assert_eq!(grid.count_presences(1), 0);
    }

    #[test]
    fn toggling_twice_restores_status() {
        let records = vec![
            record(10, 1, "2024-04-01", AttendanceStatus::Present),
            record(11, 1, "2024-04-02", AttendanceStatus::Absent),
        ];
        let original = AttendanceGrid::build(&sheet(4, 2024, records), &[student(1, "A", "B")]);
        let mut grid = original.clone();

        assert_eq!(grid.toggle(1, 1), Ok(AttendanceStatus::Absent));
        assert_eq!(grid.toggle(1, 1), Ok(AttendanceStatus::Present));
        assert_eq!(grid.toggle(1, 2), Ok(AttendanceStatus::Present));
        assert_eq!(grid.toggle(1, 2), Ok(AttendanceStatus::Absent));
        assert_eq!(grid, original);
    }

    #[test]
    fn empty_cell_toggles_to_present_then_absent() {
        let mut grid = AttendanceGrid::build(&sheet(4, 2024, vec![]), &[student(1, "A", "B")]);
        assert_eq!(grid.toggle(1, 9), Ok(AttendanceStatus::Present));
        assert_eq!(grid.toggle(1, 9), Ok(AttendanceStatus::Absent));
        assert_eq!(grid.cell(1, 9).unwrap().record_id, None);
    }

    #[test]
    fn toggle_preserves_record_id() {
        let records = vec![record(55, 1, "2024-04-03", AttendanceStatus::Absent)];
        let mut grid = AttendanceGrid::build(&sheet(4, 2024, records), &[student(1, "A", "B")]);
        grid.toggle(1, 3).unwrap();
        assert_eq!(
            grid.cell(1, 3),
            Some(GridCell {
                record_id: Some(55),
                status: Some(AttendanceStatus::Present)
            })
        );
    }

    #[test]
    fn toggle_rejects_out_of_range_days_and_unknown_students() {
        let mut grid = AttendanceGrid::build(&sheet(2, 2023, vec![]), &[student(1, "A", "B")]);
        assert_eq!(
            grid.toggle(1, 29),
            Err(GridError::DayOutOfRange {
                day: 29,
                days_in_month: 28
            })
        );
        assert_eq!(
            grid.toggle(1, 0),
            Err(GridError::DayOutOfRange {
                day: 0,
                days_in_month: 28
            })
        );
        assert_eq!(grid.toggle(99, 3), Err(GridError::UnknownStudent(99)));
    }

    #[test]
    fn presence_count_for_one_student() {
        let records = (1..=30)
            .map(|day| {
                let status = if [1, 5, 10].contains(&day) {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                };
                record(day as i64, 1, &format!("2024-06-{day:02}"), status)
            })
            .collect();
        let grid = AttendanceGrid::build(&sheet(6, 2024, records), &[student(1, "A", "B")]);
        assert_eq!(grid.count_presences(1), 3);
        assert_eq!(grid.count_presences(2), 0);
    }

    #[test]
    fn participant_hours_sum_all_students() {
        let mut records = Vec::new();
        let mut next_id = 1;
        for (student_id, present_days) in [(1, 3), (2, 5)] {
            for day in 1..=present_days {
                records.push(record(
                    next_id,
                    student_id,
                    &format!("2024-09-{day:02}"),
                    AttendanceStatus::Present,
                ));
                next_id += 1;
            }
        }
        let roster = [student(1, "A", "B"), student(2, "C", "D")];
        let grid = AttendanceGrid::build(&sheet(9, 2024, records), &roster);
        assert_eq!(grid.total_presences(), 8);
        assert_eq!(grid.participant_hours(), 24);
    }

    #[test]
    fn save_payload_keeps_ids_and_reflects_edits() {
        let mut records = Vec::new();
        for (student_id, base) in [(1, 100), (2, 200)] {
            for day in 1..=3 {
                records.push(record(
                    base + day as i64,
                    student_id,
                    &format!("2024-10-{day:02}"),
                    AttendanceStatus::Absent,
                ));
            }
        }
        let roster = [student(2, "C", "D"), student(1, "A", "B")];
        let mut grid = AttendanceGrid::build(&sheet(10, 2024, records), &roster);
        grid.toggle(1, 2).unwrap();
        grid.toggle(2, 3).unwrap();

        let payload = grid.save_payload();
        let present = AttendanceStatus::Present;
        let absent = AttendanceStatus::Absent;
        assert_eq!(
            payload,
            vec![
                RecordUpdate { id: 101, status: absent },
                RecordUpdate { id: 102, status: present },
                RecordUpdate { id: 103, status: absent },
                RecordUpdate { id: 201, status: absent },
                RecordUpdate { id: 202, status: absent },
                RecordUpdate { id: 203, status: present },
            ]
        );
    }

    #[test]
    fn unsaved_cells_are_counted_not_sent() {
        let records = vec![record(1, 1, "2024-04-01", AttendanceStatus::Absent)];
        let roster = [student(1, "A", "B"), student(2, "Late", "Enrollee")];
        let mut grid = AttendanceGrid::build(&sheet(4, 2024, records), &roster);
        grid.toggle(2, 4).unwrap();
        grid.toggle(2, 5).unwrap();
        assert_eq!(grid.unsaved_count(), 2);
        assert_eq!(grid.save_payload().len(), 1);
        assert_eq!(grid.participant_hours(), 2 * SESSION_DURATION_HOURS);
    }

    #[test]
    fn totals_only_count_roster_students() {
        let records = vec![
            record(1, 1, "2024-04-01", AttendanceStatus::Present),
            record(2, 42, "2024-04-02", AttendanceStatus::Present),
            record(3, 42, "2024-04-03", AttendanceStatus::Present),
        ];
        let grid = AttendanceGrid::build(&sheet(4, 2024, records), &[student(1, "A", "B")]);

        let shown: u32 = grid
            .roster_ids()
            .iter()
            .map(|&id| grid.count_presences(id))
            .sum();
        assert_eq!(shown, 1);
        assert_eq!(grid.total_presences(), shown);
        assert_eq!(grid.participant_hours(), 3);
        // The departed student's records still go out on save.
        assert_eq!(grid.save_payload().len(), 3);
    }

    #[test]
    fn roster_order_is_kept() {
        let roster = [student(5, "Zed", "A"), student(2, "Amar", "B")];
        let grid = AttendanceGrid::build(&sheet(4, 2024, vec![]), &roster);
        assert_eq!(grid.roster_ids(), &[5, 2]);
    }

    #[test]
    fn records_for_students_missing_from_roster_still_get_a_row() {
        let records = vec![record(9, 42, "2024-04-01", AttendanceStatus::Present)];
        let grid = AttendanceGrid::build(&sheet(4, 2024, records), &[]);
        assert!(grid.contains_student(42));
        assert_eq!(grid.cell(42, 2), Some(GridCell::default()));
    }

    #[test]
    fn sheet_decodes_backend_payload() {
        let json = r#"{
            "id": 4,
            "mois": "02",
            "annee": 2024,
            "presences": [
                {"id": 1, "id_eleve": 8, "date_presence": "2024-02-29", "statut": "P"}
            ]
        }"#;
        let sheet: AttendanceSheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.month.number(), 2);
        assert_eq!(sheet.records[0].status, AttendanceStatus::Present);

        let body = serde_json::to_value(RecordUpdate {
            id: 1,
            status: AttendanceStatus::Absent,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"id": 1, "statut": "A"}));
    }

    #[test]
    fn create_request_rejects_old_years() {
        let req = CreateSheetRequest {
            month: Month::new(1).unwrap(),
            year: 1999,
        };
        let err = req.check().unwrap_err();
        assert!(err.field_errors.contains_key("year"));
        assert!(CreateSheetRequest { year: 2024, ..req }.check().is_ok());
    }
}
