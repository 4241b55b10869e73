//! Kanban Filters Component
//!
//! Toolbar: task counter, sprint picker, debounced search, issue type,
//! assignee and bookmark filters, API key.

use board_core::debounce::Debouncer;
use board_core::domain::{BookmarkFilter, BookmarkState};
use board_core::filter::narrow_options;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ApiKeyInput;
use crate::context::use_app_context;
use crate::store::{store_filtered_tasks, use_ui_store, UiStateStoreFields};

fn bookmark_filter_label(filter: BookmarkFilter) -> &'static str {
    match filter {
        BookmarkFilter::All => "Bookmarks: All",
        BookmarkFilter::Only(BookmarkState::Flagged) => "Bookmarks: Yellow",
        BookmarkFilter::Only(_) => "Bookmarks: Red",
    }
}

/// Sprint name input with a history dropdown
#[component]
fn SprintPicker(on_refresh: Callback<String>) -> impl IntoView {
    let ctx = use_app_context();
    let prefs = ctx.prefs();

    let (sprint, set_sprint) = signal(prefs.sprint_name());
    let (history, set_history) = signal(prefs.sprint_history());
    let (show_history, set_show_history) = signal(false);

    let submit = move || {
        let name = sprint.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        let prefs = ctx.prefs();
        if let Err(e) = prefs.set_sprint_name(&name) {
            log::warn!("[BOARD] Could not save sprint name: {}", e);
        }
        match prefs.remember_sprint(&name) {
            Ok(updated) => set_history.set(updated),
            Err(e) => log::warn!("[BOARD] Could not save sprint history: {}", e),
        }
        set_show_history.set(false);
        on_refresh.run(name);
    };

    view! {
        <div class="sprint-picker">
            <input
                type="text"
                class="sprint-input"
                placeholder="Sprint name"
                prop:value=move || sprint.get()
                on:input=move |ev| set_sprint.set(event_target_value(&ev))
                on:focus=move |_| set_show_history.set(true)
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    match ev.key().as_str() {
                        "Enter" => submit(),
                        "Escape" => set_show_history.set(false),
                        _ => {}
                    }
                }
            />
            <button class="refresh-btn" title="Refresh" on:click=move |_| submit()>"⟳"</button>
            <Show when=move || show_history.get() && !history.get().is_empty()>
                <ul class="sprint-history">
                    <For
                        each=move || history.get()
                        key=|name| name.clone()
                        children=move |name| {
                            let label = name.clone();
                            view! {
                                <li on:mousedown=move |_| {
                                    set_sprint.set(name.clone());
                                    submit();
                                }>{label}</li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}

/// Search box: the input echoes at once, the filter follows after a pause
#[component]
fn SearchBox() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let (text, set_text) = signal(store.filters().with_untracked(|f| f.search.clone()));
    let debouncer = StoredValue::new_local(Debouncer::new(ctx.config().search_debounce_ms));
    // A pending search must not land after the box is gone
    on_cleanup(move || {
        debouncer.try_with_value(Debouncer::cancel);
    });

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_text.set(value.clone());
        let debouncer = debouncer.get_value();
        let ticket = debouncer.schedule();
        spawn_local(async move {
            TimeoutFuture::new(debouncer.delay_ms()).await;
            if !debouncer.is_current(ticket) {
                return;
            }
            store.filters().write().search = value.clone();
            if let Err(e) = ctx.prefs().set_search_text(&value) {
                log::warn!("[BOARD] Could not save search text: {}", e);
            }
        });
    };

    view! {
        <input
            type="search"
            class="search-input"
            placeholder="Search id, summary, assignee..."
            prop:value=move || text.get()
            on:input=on_input
        />
    }
}

/// Multi-select dropdown over the issue types on the board
#[component]
fn IssueTypeFilter() -> impl IntoView {
    let store = use_ui_store();
    let (open, set_open) = signal(false);

    let options = move || store.board().with(|b| b.unique_issue_types());
    let label = move || {
        let selected = store.filters().with(|f| f.issue_types.len());
        if selected == 0 { "Issue Type".to_string() } else { format!("Issue Type ({})", selected) }
    };
    let all_selected = move || {
        let available = options().len();
        store.filters().with(|f| available > 0 && f.issue_types.len() == available)
    };

    view! {
        <div class="filter-dropdown">
            <button class="filter-btn" on:click=move |_| set_open.update(|v| *v = !*v)>{label}</button>
            <Show when=move || open.get()>
                <div class="filter-menu">
                    <label class="filter-option select-all">
                        <input
                            type="checkbox"
                            prop:checked=all_selected
                            on:change=move |_| {
                                let available = options();
                                store.filters().write().select_all_issue_types(&available);
                            }
                        />
                        "Select all"
                    </label>
                    <For
                        each=options
                        key=|t| t.clone()
                        children=move |issue_type| {
                            let checked = {
                                let issue_type = issue_type.clone();
                                move || store.filters().with(|f| f.issue_types.contains(&issue_type))
                            };
                            let label = issue_type.clone();
                            view! {
                                <label class="filter-option">
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        on:change=move |_| store.filters().write().toggle_issue_type(&issue_type)
                                    />
                                    {label}
                                </label>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}

/// Multi-select dropdown over assignees, narrowed by a query
#[component]
fn AssigneeFilter() -> impl IntoView {
    let store = use_ui_store();
    let (open, set_open) = signal(false);
    let (query, set_query) = signal(String::new());

    let options = move || store.board().with(|b| b.unique_assignees());
    let visible = move || {
        let all = options();
        let query = query.get();
        narrow_options(&all, &query).into_iter().cloned().collect::<Vec<_>>()
    };
    let label = move || {
        let selected = store.filters().with(|f| f.assignees.len());
        if selected == 0 { "Assignee".to_string() } else { format!("Assignee ({})", selected) }
    };
    let all_selected = move || {
        let available = options().len();
        store.filters().with(|f| available > 0 && f.assignees.len() == available)
    };

    view! {
        <div class="filter-dropdown">
            <button class="filter-btn" on:click=move |_| set_open.update(|v| *v = !*v)>{label}</button>
            <Show when=move || open.get()>
                <div class="filter-menu">
                    <input
                        type="text"
                        class="filter-search"
                        placeholder="Find assignee..."
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <label class="filter-option select-all">
                        <input
                            type="checkbox"
                            prop:checked=all_selected
                            on:change=move |_| {
                                let available = options();
                                store.filters().write().select_all_assignees(&available);
                            }
                        />
                        "Select all"
                    </label>
                    <For
                        each=visible
                        key=|a| a.clone()
                        children=move |assignee| {
                            let checked = {
                                let assignee = assignee.clone();
                                move || store.filters().with(|f| f.assignees.contains(&assignee))
                            };
                            let label = assignee.clone();
                            view! {
                                <label class="filter-option">
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        on:change=move |_| store.filters().write().toggle_assignee(&assignee)
                                    />
                                    {label}
                                </label>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn KanbanFilters(on_refresh: Callback<String>) -> impl IntoView {
    let store = use_ui_store();

    let count_label = move || {
        let filtered = store_filtered_tasks(&store).len();
        let total = store.board().with(|b| b.tasks.len());
        store.filters().with(|f| f.count_label(filtered, total))
    };

    let bookmark_filter = move || store.filters().with(|f| f.bookmark);

    view! {
        <div class="kanban-filters">
            <span class="task-count">{count_label}</span>
            <SprintPicker on_refresh=on_refresh />
            <SearchBox />
            <IssueTypeFilter />
            <AssigneeFilter />
            <button
                class=move || if bookmark_filter().is_active() { "filter-btn bookmark active" } else { "filter-btn bookmark" }
                on:click=move |_| store.filters().update(|f| f.bookmark = f.bookmark.next())
            >
                {move || bookmark_filter_label(bookmark_filter())}
            </button>
            <ApiKeyInput />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_filter_labels_cycle() {
        let mut filter = BookmarkFilter::All;
        let mut labels = Vec::new();
        for _ in 0..3 {
            labels.push(bookmark_filter_label(filter));
            filter = filter.next();
        }
        assert_eq!(labels, ["Bookmarks: All", "Bookmarks: Yellow", "Bookmarks: Red"]);
        assert_eq!(filter, BookmarkFilter::All);
    }
}
