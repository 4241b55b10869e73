//! Kanban Column Component

use board_core::domain::Column;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_column_mouseenter, make_on_mouseleave, DndSignals, DropTarget};

use crate::components::TaskCard;
use crate::store::{store_filtered_tasks, use_ui_store, UiStateStoreFields};

#[component]
pub fn KanbanColumn(column: Column, dnd: DndSignals) -> impl IntoView {
    let store = use_ui_store();
    let Column { id, title, highlighted } = column;
    let is_other = id == board_core::domain::OTHER_STATUS;

    let column_tasks = {
        let id = id.clone();
        move || {
            let filtered = store_filtered_tasks(&store);
            let refs: Vec<_> = filtered.iter().collect();
            store.board().with(|board| {
                board
                    .tasks_in_column(&refs, &id)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        }
    };

    let column_class = {
        let id = id.clone();
        move || {
            let is_drop_target = matches!(dnd.drop_target_read.get(), Some(DropTarget::Column(ref c)) if *c == id);
            let mut c = String::from("kanban-column");
            if highlighted { c.push_str(" highlighted"); }
            if is_other { c.push_str(" other-status"); }
            if is_drop_target { c.push_str(" drop-target"); }
            c
        }
    };

    let count = {
        let column_tasks = column_tasks.clone();
        move || column_tasks().len()
    };

    let on_mouseenter = make_on_column_mouseenter(dnd, id.clone());
    let on_mouseleave = make_on_mouseleave(dnd);
    let card_column = id.clone();

    view! {
        <div class=column_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <div class="kanban-column-header">
                <span class="kanban-column-title">{title}</span>
                <span class="kanban-column-count">{count}</span>
            </div>
            <div class="kanban-column-body">
                <For
                    each=column_tasks
                    key=|task| (task.id, task.column_id.clone(), task.row.status.clone())
                    children=move |task| {
                        view! { <TaskCard task=task column_id=card_column.clone() dnd=dnd /> }
                    }
                />
            </div>
        </div>
    }
}
