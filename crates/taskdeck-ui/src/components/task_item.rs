use chrono::Utc;
use chrono_tz::Tz;
use taskdeck_core::due::badge_for;
use taskdeck_core::task::{Task, TaskPriority};
use yew::{Callback, Html, Properties, classes, function_component, html};

use super::DueDateBadge;

#[derive(Properties, PartialEq)]
pub struct TaskItemProps {
    pub task: Task,
    pub tz: Tz,
    pub on_toggle: Callback<Task>,
    pub on_delete: Callback<String>,
}

#[function_component(TaskItem)]
pub fn task_item(props: &TaskItemProps) -> Html {
    let task = &props.task;
    let completed = task.status.is_completed();

    let accent = match task.priority {
        TaskPriority::High => "priority-high",
        TaskPriority::Medium => "priority-medium",
        TaskPriority::Low => "priority-low",
    };

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        let task = task.clone();
        Callback::from(move |_| on_toggle.emit(task.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = task.id.clone();
        Callback::from(move |_| on_delete.emit(id.clone()))
    };

    // Completed tasks suppress the due badge no matter the due date.
    let due_badge = badge_for(task, Utc::now(), props.tz);

    html! {
        <div class={classes!("task-row", accent, completed.then_some("done"))}>
            <input
                type="checkbox"
                checked={completed}
                onclick={on_toggle}
            />
            <div class="task-main">
                <div class={classes!("task-title", completed.then_some("struck"))}>
                    { &task.title }
                </div>
                <div class="task-meta">
                    {
                        if task.description.is_empty() {
                            html! {}
                        } else {
                            html! { <span class="task-subtitle">{ &task.description }</span> }
                        }
                    }
                    {
                        if let Some((status, label)) = due_badge {
                            html! { <DueDateBadge {status} {label} /> }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
            <button class="btn danger" onclick={on_delete}>
                { "Delete" }
            </button>
        </div>
    }
}
