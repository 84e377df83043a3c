use std::rc::Rc;

use taskdeck_core::list::{ListOverlay, TaskMutation, sort_for_display};
use taskdeck_core::task::{Task, TaskPatch};
use yew::{
    Callback, Html, Properties, Reducible, classes, function_component, html,
    use_effect_with, use_mut_ref, use_reducer_eq, use_state,
};

use super::TaskItem;
use crate::api::{delete_task, update_task};
use crate::config::display_timezone;

#[derive(Default, PartialEq)]
struct OverlayState {
    overlay: ListOverlay,
}

enum OverlayAction {
    Begin { seq: u64, mutation: TaskMutation },
    Confirm { seq: u64 },
    Rollback { seq: u64 },
    Reconcile,
}

impl Reducible for OverlayState {
    type Action = OverlayAction;

    fn reduce(self: Rc<Self>, action: OverlayAction) -> Rc<Self> {
        let mut overlay = self.overlay.clone();
        match action {
            OverlayAction::Begin { seq, mutation } => {
                overlay.begin(seq, mutation);
            }
            OverlayAction::Confirm { seq } => overlay.confirm(seq),
            OverlayAction::Rollback { seq } => overlay.rollback(seq),
            OverlayAction::Reconcile => overlay.reconcile(),
        }
        Rc::new(OverlayState { overlay })
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
    pub tasks: Vec<Task>,
    pub on_changed: Callback<()>,
}

/// Renders the task collection through the optimistic overlay: every
/// toggle/delete applies its delta locally first, then issues the request
/// and either confirms (followed by the parent's authoritative reload) or
/// rolls back with an inline error.
#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    let overlay = use_reducer_eq(OverlayState::default);
    let seq_counter = use_mut_ref(|| 0_u64);
    let error = use_state(|| None::<String>);

    {
        // A fresh authoritative snapshot absorbs confirmed deltas.
        let overlay = overlay.clone();
        use_effect_with(props.tasks.clone(), move |_| {
            overlay.dispatch(OverlayAction::Reconcile);
            || ()
        });
    }

    let next_seq = {
        let seq_counter = seq_counter.clone();
        move || {
            let mut counter = seq_counter.borrow_mut();
            *counter += 1;
            *counter
        }
    };

    let on_toggle = {
        let overlay = overlay.clone();
        let error = error.clone();
        let on_changed = props.on_changed.clone();
        let next_seq = next_seq.clone();
        Callback::from(move |task: Task| {
            let seq = next_seq();
            overlay.dispatch(OverlayAction::Begin {
                seq,
                mutation: TaskMutation::ToggleStatus {
                    id: task.id.clone(),
                },
            });
            error.set(None);

            let overlay = overlay.clone();
            let error = error.clone();
            let on_changed = on_changed.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let patch = TaskPatch::status(task.status.toggled());
                match update_task(&task.id, &patch).await {
                    Ok(updated) => {
                        tracing::debug!(
                            id = %updated.id,
                            status = ?updated.status,
                            "task status updated"
                        );
                        overlay.dispatch(OverlayAction::Confirm { seq });
                        on_changed.emit(());
                    }
                    Err(err) => {
                        tracing::error!(
                            error = %err,
                            id = %task.id,
                            "status update failed"
                        );
                        overlay.dispatch(OverlayAction::Rollback { seq });
                        error.set(Some("Failed to update task.".to_string()));
                    }
                }
            });
        })
    };

    let on_delete = {
        let overlay = overlay.clone();
        let error = error.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |id: String| {
            let seq = next_seq();
            overlay.dispatch(OverlayAction::Begin {
                seq,
                mutation: TaskMutation::Remove { id: id.clone() },
            });
            error.set(None);

            let overlay = overlay.clone();
            let error = error.clone();
            let on_changed = on_changed.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match delete_task(&id).await {
                    Ok(()) => {
                        tracing::debug!(id = %id, "task deleted");
                        overlay.dispatch(OverlayAction::Confirm { seq });
                        on_changed.emit(());
                    }
                    Err(err) => {
                        tracing::error!(error = %err, id = %id, "delete failed");
                        overlay.dispatch(OverlayAction::Rollback { seq });
                        let message = if err.is_not_found() {
                            "Task no longer exists."
                        } else {
                            "Failed to delete task."
                        };
                        error.set(Some(message.to_string()));
                    }
                }
            });
        })
    };

    let mut visible = overlay.overlay.project(&props.tasks);
    sort_for_display(&mut visible);
    let transitioning = overlay.overlay.is_transitioning();
    let tz = display_timezone();

    if visible.is_empty() {
        return html! {
            <div class="placeholder">
                <p>{ "No tasks yet." }</p>
                <p class="hint">{ "Add one above to get started." }</p>
            </div>
        };
    }

    html! {
        <div class={classes!("task-list", transitioning.then_some("transitioning"))}>
            {
                if let Some(message) = (*error).clone() {
                    html! { <div class="inline-error">{ message }</div> }
                } else {
                    html! {}
                }
            }
            {
                for visible.into_iter().map(|task| {
                    let key = task.id.clone();
                    html! {
                        <TaskItem
                            {key}
                            {task}
                            {tz}
                            on_toggle={on_toggle.clone()}
                            on_delete={on_delete.clone()}
                        />
                    }
                })
            }
        </div>
    }
}
