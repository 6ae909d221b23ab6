use dioxus::prelude::*;
use shared_types::{AppError, AttendanceGrid, GridCell, RosterStudent, SESSION_DURATION_HOURS};
use shared_ui::{
    use_toast, Button, ButtonVariant, ConfirmDialog, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, ErrorCard, PageActions,
    PageHeader, PageSubtitle, PageTitle, SkeletonRows, ToggleCell, ToastOptions,
};

use crate::routes::Route;

/// Monthly attendance grid for one sheet.
///
/// The roster and the sheet load side by side. Once both are in, the grid is
/// built once and every click edits it in memory; nothing reaches the server
/// until Save sends the whole sheet.
#[component]
pub fn AttendanceSheetPage(session_id: i64, sheet_id: i64) -> Element {
    let toast = use_toast();

    let mut roster = use_resource(move || async move { server::api::session_roster(session_id).await });
    let mut sheet = use_resource(move || async move { server::api::get_sheet(sheet_id).await });

    // `loaded` is the grid as the server last stored it, `grid` the working copy.
    let mut loaded = use_signal(|| Option::<AttendanceGrid>::None);
    let mut grid = use_signal(|| Option::<AttendanceGrid>::None);
    let mut saving = use_signal(|| false);
    let mut confirm_leave = use_signal(|| false);

    use_effect(move || {
        if let (Some(Ok(s)), Some(Ok(r))) = (&*sheet.read(), &*roster.read()) {
            if grid.peek().is_none() {
                let built = AttendanceGrid::build(s, r);
                tracing::debug!(sheet_id, students = r.len(), days = built.days(), "Grid built");
                loaded.set(Some(built.clone()));
                grid.set(Some(built));
            }
        }
    });

    let has_changes = *grid.read() != *loaded.read();

    let handle_toggle = move |(student_id, day): (i64, u32)| {
        let mut guard = grid.write();
        let Some(g) = guard.as_mut() else {
            return;
        };
        if let Err(e) = g.toggle(student_id, day) {
            tracing::warn!(sheet_id, student_id, day, error = %e, "Toggle rejected");
        }
    };

    let handle_save = move |_| async move {
        let Some(payload) = grid.read().as_ref().map(AttendanceGrid::save_payload) else {
            return;
        };
        saving.set(true);
        match server::api::save_sheet(sheet_id, payload).await {
            Ok(()) => {
                loaded.set(grid.read().clone());
                toast.success("Attendance saved".to_string(), ToastOptions::new());
                navigator().push(Route::SessionDetail { id: session_id });
            }
            Err(e) => {
                tracing::error!(sheet_id, error = %e, "Attendance save failed");
                toast.error(
                    format!("{} Your changes are still here.", AppError::friendly_message(&e.to_string())),
                    ToastOptions::new(),
                );
            }
        }
        saving.set(false);
    };

    let handle_back = move |_| {
        if has_changes {
            confirm_leave.set(true);
        } else {
            navigator().push(Route::SessionDetail { id: session_id });
        }
    };

    let retry = move |_| {
        grid.set(None);
        loaded.set(None);
        roster.restart();
        sheet.restart();
    };

    let load_error = match (&*sheet.read(), &*roster.read()) {
        (Some(Err(e)), _) | (_, Some(Err(e))) => Some(AppError::friendly_message(&e.to_string())),
        _ => None,
    };
    let roster_list: Vec<RosterStudent> = match &*roster.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

    let title = grid
        .read()
        .as_ref()
        .map(|g| format!("Attendance · {} {}", g.month().name(), g.year()))
        .unwrap_or_else(|| "Attendance".to_string());

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{title}" }
                PageSubtitle { "Click a cell to mark a student present or absent." }
                PageActions {
                    Button { variant: ButtonVariant::Ghost, onclick: handle_back, "Back" }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: grid.read().is_none(),
                        busy: saving(),
                        busy_label: "Saving...",
                        onclick: handle_save,
                        "Save"
                    }
                }
            }

            if let Some(message) = load_error {
                ErrorCard { message: message, on_retry: retry }
            } else if let Some(g) = grid.read().clone() {
                if g.unsaved_count() > 0 {
                    div { class: "notice",
                        "{g.unsaved_count()} marked day(s) have no stored record on this sheet and will not be saved."
                    }
                }
                AttendanceTable {
                    grid: g.clone(),
                    loaded: loaded.read().clone(),
                    roster: roster_list,
                    disabled: saving(),
                    on_toggle: handle_toggle,
                }
                p { class: "muted",
                    "{g.total_presences()} presences × {SESSION_DURATION_HOURS} h = {g.participant_hours()} participant-hours"
                }
            } else {
                SkeletonRows { rows: 8 }
            }

            ConfirmDialog {
                open: confirm_leave,
                title: "Discard unsaved attendance?",
                description: "The changes made on this sheet have not been saved.",
                confirm_label: "Discard",
                on_confirm: move |_| {
                    navigator().push(Route::SessionDetail { id: session_id });
                },
            }
        }
    }
}

#[component]
fn AttendanceTable(
    grid: AttendanceGrid,
    loaded: Option<AttendanceGrid>,
    roster: Vec<RosterStudent>,
    disabled: bool,
    on_toggle: EventHandler<(i64, u32)>,
) -> Element {
    let days: Vec<u32> = grid.day_numbers().collect();
    let colspan = days.len() + 2;
    let rows: Vec<(RosterStudent, Vec<(u32, GridCell, bool)>, u32)> = roster
        .into_iter()
        .filter(|s| grid.contains_student(s.id))
        .map(|student| {
            let cells = days
                .iter()
                .map(|&day| {
                    let cell = grid.cell(student.id, day).unwrap_or_default();
                    let stored = loaded.as_ref().and_then(|l| l.cell(student.id, day));
                    (day, cell, stored != Some(cell))
                })
                .collect();
            let count = grid.count_presences(student.id);
            (student, cells, count)
        })
        .collect();

    rsx! {
        DataTable { class: "attendance-grid",
            DataTableHeader {
                DataTableColumn { "Student" }
                for day in days.iter().copied() {
                    DataTableColumn { numeric: true, "{day}" }
                }
                DataTableColumn { numeric: true, "Total" }
            }
            DataTableBody {
                if rows.is_empty() {
                    DataTableEmpty { colspan: colspan, message: "Nobody is enrolled in this session" }
                }
                for (student, cells, count) in rows {
                    AttendanceRow {
                        student: student,
                        cells: cells,
                        count: count,
                        disabled: disabled,
                        on_toggle: on_toggle,
                    }
                }
            }
        }
    }
}

#[component]
fn AttendanceRow(
    student: RosterStudent,
    cells: Vec<(u32, GridCell, bool)>,
    count: u32,
    disabled: bool,
    on_toggle: EventHandler<(i64, u32)>,
) -> Element {
    let id = student.id;
    let name = student.full_name();

    rsx! {
        DataTableRow {
            DataTableCell { "{name}" }
            for (day, cell, dirty) in cells {
                ToggleCell {
                    pressed: cell.is_present(),
                    dirty: dirty,
                    disabled: disabled,
                    title: format!("{name}, day {day}"),
                    onclick: move |_| on_toggle.call((id, day)),
                    "{cell.mark()}"
                }
            }
            DataTableCell { numeric: true, "{count}" }
        }
    }
}
