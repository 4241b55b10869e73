//! Attendance Page Component
//!
//! Report type and date range pickers, search with cancel, a column
//! visibility picker and the attendance table.

use board_core::attendance::{Completion, SearchStart};
use board_core::domain::{DateRange, ReportType, ATTENDANCE_COLUMNS};
use board_core::ReportApi;
use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn all_column_keys() -> Vec<String> {
    ATTENDANCE_COLUMNS.iter().map(|(key, _)| key.to_string()).collect()
}

/// Checkbox list deciding which table columns are shown
#[component]
fn ColumnPicker(visible: ReadSignal<Vec<String>>, set_visible: WriteSignal<Vec<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let (open, set_open) = signal(false);

    let save = move |keys: Vec<String>| {
        if let Err(e) = ctx.prefs().set_attendance_columns(&keys) {
            log::warn!("[ATTEND] Could not save column visibility: {}", e);
        }
        set_visible.set(keys);
    };

    let toggle = move |key: &str| {
        let mut keys = visible.get_untracked();
        if keys.iter().any(|k| k == key) {
            keys.retain(|k| k != key);
        } else {
            // Keep table order
            keys = ATTENDANCE_COLUMNS
                .iter()
                .map(|(k, _)| *k)
                .filter(|k| *k == key || keys.iter().any(|v| v == k))
                .map(str::to_string)
                .collect();
        }
        save(keys);
    };

    view! {
        <div class="filter-dropdown column-picker">
            <button class="filter-btn" on:click=move |_| set_open.update(|v| *v = !*v)>"Columns"</button>
            <Show when=move || open.get()>
                <div class="filter-menu">
                    <button class="show-all" on:click=move |_| save(all_column_keys())>"Show all"</button>
                    {ATTENDANCE_COLUMNS.iter().map(|(key, label)| {
                        let key = *key;
                        view! {
                            <label class="filter-option">
                                <input
                                    type="checkbox"
                                    prop:checked=move || visible.get().iter().any(|k| k == key)
                                    on:change=move |_| toggle(key)
                                />
                                {*label}
                            </label>
                        }
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn AttendancePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let prefs = ctx.prefs();

    let initial_type = prefs.report_type();
    let initial_range = prefs
        .date_range()
        .or_else(|| initial_type.range(today()))
        .unwrap_or_else(|| DateRange::single(today()));

    let (report_type, set_report_type) = signal(initial_type);
    let (range, set_range) = signal(initial_range);
    let (visible, set_visible) = signal(prefs.attendance_columns().unwrap_or_else(all_column_keys));

    let persist_range = move |new_range: DateRange| {
        set_range.set(new_range);
        if let Err(e) = ctx.prefs().set_date_range(&new_range) {
            log::warn!("[ATTEND] Could not save date range: {}", e);
        }
    };

    let persist_type = move |new_type: ReportType| {
        set_report_type.set(new_type);
        if let Err(e) = ctx.prefs().set_report_type(new_type) {
            log::warn!("[ATTEND] Could not save report type: {}", e);
        }
    };

    let on_type_change = move |ev: web_sys::Event| {
        let Some(new_type) = ReportType::from_label(&event_target_value(&ev)) else {
            return;
        };
        persist_type(new_type);
        if let Some(new_range) = new_type.range(today()) {
            persist_range(new_range);
        }
    };

    // Editing either date means a custom range
    let on_date_change = move |ev: web_sys::Event, is_from: bool| {
        let Ok(day) = NaiveDate::parse_from_str(&event_target_value(&ev), DATE_INPUT_FORMAT) else {
            return;
        };
        let mut new_range = range.get_untracked();
        if is_from { new_range.from = day; } else { new_range.to = day; }
        persist_type(ReportType::CustomDate);
        persist_range(new_range);
    };

    let search = move |_| {
        let selected = range.get_untracked();
        if selected.from > selected.to {
            *store.attendance_error().write() = Some("From date must not be after To date".to_string());
            return;
        }
        *store.attendance_error().write() = None;

        let prefs = ctx.prefs();
        let start = store.attendance().try_update(|a| a.begin(selected, &prefs));
        match start {
            Some(SearchStart::Cached(count)) => log::info!("[ATTEND] Showing {} cached rows", count),
            Some(SearchStart::Fetch(ticket)) => {
                let api = ctx.api();
                log::info!("[ATTEND] Search {} for {} to {}", ticket.id, ticket.range.from, ticket.range.to);
                spawn_local(async move {
                    let result = api.fetch_attendance(&ticket.range, &ticket.token).await;
                    let completion = store.attendance().try_update(|a| a.complete(&ticket, result, &prefs));
                    match completion {
                        Some(Completion::Loaded(count)) => log::info!("[ATTEND] Loaded {} rows", count),
                        Some(Completion::Failed(message)) => *store.attendance_error().write() = Some(message),
                        _ => log::debug!("[ATTEND] Search {} superseded", ticket.id),
                    }
                });
            }
            None => {}
        }
    };

    let cancel = move |_: web_sys::MouseEvent| store.attendance().update(|a| a.cancel());

    let is_loading = move || store.attendance().with(|a| a.is_loading());

    let headers = move || {
        let visible = visible.get();
        ATTENDANCE_COLUMNS
            .iter()
            .filter(|(key, _)| visible.iter().any(|k| k == key))
            .map(|(_, label)| view! { <th>{*label}</th> })
            .collect_view()
    };

    let rows = move || {
        let visible = visible.get();
        let keys: Vec<&str> = ATTENDANCE_COLUMNS
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| visible.iter().any(|k| k == key))
            .collect();
        store.attendance().with(|a| {
            a.rows()
                .iter()
                .map(|record| {
                    let cells = keys
                        .iter()
                        .map(|key| view! { <td>{record.cell(key)}</td> })
                        .collect_view();
                    view! { <tr>{cells}</tr> }
                })
                .collect_view()
        })
    };

    let summary = move || {
        store.attendance().with(|a| match a.shown_range() {
            Some(shown) => format!("{} rows, {} to {}", a.rows().len(), shown.from, shown.to),
            None => "No search yet".to_string(),
        })
    };

    view! {
        <div class="attendance-page">
            <div class="attendance-toolbar">
                <select class="report-type" on:change=on_type_change>
                    {ReportType::ALL.iter().map(|t| {
                        let t = *t;
                        view! {
                            <option value=t.label() selected=move || report_type.get() == t>{t.label()}</option>
                        }
                    }).collect_view()}
                </select>
                <label>
                    "From "
                    <input
                        type="date"
                        prop:value=move || range.get().from.format(DATE_INPUT_FORMAT).to_string()
                        on:change=move |ev| on_date_change(ev, true)
                    />
                </label>
                <label>
                    "To "
                    <input
                        type="date"
                        prop:value=move || range.get().to.format(DATE_INPUT_FORMAT).to_string()
                        on:change=move |ev| on_date_change(ev, false)
                    />
                </label>
                <button class="primary" on:click=search>"Search"</button>
                <Show when=is_loading>
                    <button on:click=cancel>"Cancel"</button>
                    <span class="loading-indicator">"Loading..."</span>
                </Show>
                <ColumnPicker visible=visible set_visible=set_visible />
            </div>

            {move || store.attendance_error().get().map(|msg| view! { <div class="error-banner">{msg}</div> })}

            <div class="attendance-summary">{summary}</div>

            <div class="attendance-table-wrapper">
                <table class="attendance-table">
                    <thead><tr>{headers}</tr></thead>
                    <tbody>{rows}</tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_column_keys_keep_table_order() {
        let keys = all_column_keys();
        assert_eq!(keys.len(), ATTENDANCE_COLUMNS.len());
        assert_eq!(keys.first().map(String::as_str), Some("S No"));
        assert_eq!(keys.last().map(String::as_str), Some("Second Half"));
    }
}
