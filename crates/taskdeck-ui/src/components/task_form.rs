use chrono_tz::Tz;
use taskdeck_core::due::{format_for_input, parse_input_value};
use taskdeck_core::task::{ParsedTask, TaskCreate, TaskPriority};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::{
    Callback, Html, InputEvent, KeyboardEvent, Properties, TargetCast,
    classes, function_component, html, use_state,
};

use super::PriorityBadge;
use crate::api::{create_task, parse_task_text};
use crate::config::{FormMode, display_timezone, load_form_mode, save_form_mode};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
    pub on_created: Callback<()>,
}

/// Free-text entry with two modes behind a persisted toggle: direct mode
/// creates a task from the text immediately; AI mode sends it through the
/// parse endpoint and shows an editable preview before anything persists.
#[function_component(TaskForm)]
pub fn task_form(props: &TaskFormProps) -> Html {
    let mode = use_state(load_form_mode);
    let input = use_state(String::new);
    let preview = use_state(|| None::<ParsedTask>);
    let parsing = use_state(|| false);
    let creating = use_state(|| false);
    let error = use_state(|| None::<String>);

    let tz = display_timezone();
    let busy = *parsing || *creating;
    let input_empty = input.trim().is_empty();

    let on_input = {
        let input = input.clone();
        Callback::from(move |event: InputEvent| {
            let field: HtmlInputElement = event.target_unchecked_into();
            input.set(field.value());
        })
    };

    let on_mode_toggle = {
        let mode = mode.clone();
        let preview = preview.clone();
        let error = error.clone();
        Callback::from(move |_| {
            let next = match *mode {
                FormMode::Ai => FormMode::Direct,
                FormMode::Direct => FormMode::Ai,
            };
            save_form_mode(next);
            mode.set(next);
            preview.set(None);
            error.set(None);
        })
    };

    let run_parse = {
        let input = input.clone();
        let preview = preview.clone();
        let parsing = parsing.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let text = input.trim().to_string();
            if text.is_empty() || *parsing {
                return;
            }
            error.set(None);
            parsing.set(true);

            let preview = preview.clone();
            let parsing = parsing.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match parse_task_text(&text).await {
                    Ok(response) => {
                        tracing::debug!(
                            title = %response.parsed.title,
                            "parse preview ready"
                        );
                        preview.set(Some(response.parsed));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "parse request failed");
                        error.set(Some(
                            "Could not parse that. Please try again."
                                .to_string(),
                        ));
                    }
                }
                parsing.set(false);
            });
        })
    };

    let run_direct_create = {
        let input = input.clone();
        let creating = creating.clone();
        let error = error.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |_: ()| {
            let title = input.trim().to_string();
            if title.is_empty() || *creating {
                return;
            }
            error.set(None);
            creating.set(true);

            let input = input.clone();
            let creating = creating.clone();
            let error = error.clone();
            let on_created = on_created.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match create_task(&TaskCreate::titled(title)).await {
                    Ok(created) => {
                        tracing::info!(id = %created.id, "task created");
                        input.set(String::new());
                        on_created.emit(());
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "create failed");
                        error.set(Some("Failed to create task.".to_string()));
                    }
                }
                creating.set(false);
            });
        })
    };

    let on_submit = {
        let mode = mode.clone();
        let run_parse = run_parse.clone();
        let run_direct_create = run_direct_create.clone();
        Callback::from(move |_| match *mode {
            FormMode::Ai => run_parse.emit(()),
            FormMode::Direct => run_direct_create.emit(()),
        })
    };

    let on_keydown = {
        let on_submit = on_submit.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                on_submit.emit(());
            }
        })
    };

    let on_cancel_preview = {
        let preview = preview.clone();
        let error = error.clone();
        Callback::from(move |_| {
            preview.set(None);
            error.set(None);
        })
    };

    let on_create_from_preview = {
        let input = input.clone();
        let preview = preview.clone();
        let creating = creating.clone();
        let error = error.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |_| {
            let Some(parsed) = (*preview).clone() else {
                return;
            };
            if parsed.title.trim().is_empty() || *creating {
                return;
            }
            error.set(None);
            creating.set(true);

            let body = TaskCreate {
                title: parsed.title,
                description: if parsed.description.is_empty() {
                    None
                } else {
                    Some(parsed.description)
                },
                due_date: parsed.due_date,
                status: None,
                priority: Some(parsed.priority),
            };

            let input = input.clone();
            let preview = preview.clone();
            let creating = creating.clone();
            let error = error.clone();
            let on_created = on_created.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match create_task(&body).await {
                    Ok(created) => {
                        tracing::info!(id = %created.id, "task created from preview");
                        input.set(String::new());
                        preview.set(None);
                        on_created.emit(());
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "create from preview failed");
                        error.set(Some("Failed to create task.".to_string()));
                    }
                }
                creating.set(false);
            });
        })
    };

    let mode_label = match *mode {
        FormMode::Ai => "AI parse on",
        FormMode::Direct => "AI parse off",
    };
    let submit_label = match (*mode, *parsing) {
        (FormMode::Ai, true) => "Parsing...",
        (FormMode::Ai, false) => "Parse",
        (FormMode::Direct, _) => "Add",
    };
    let placeholder = match *mode {
        FormMode::Ai => {
            "Describe a task... (e.g. \"report due tomorrow, high priority\")"
        }
        FormMode::Direct => "Task title...",
    };

    html! {
        <div class="task-form">
            <div class="form-row">
                <input
                    type="text"
                    value={(*input).clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    {placeholder}
                    disabled={busy || preview.is_some()}
                />
                <button
                    class="btn"
                    onclick={move |_| on_submit.emit(())}
                    disabled={busy || input_empty || preview.is_some()}
                >
                    { submit_label }
                </button>
                <button class="btn ghost" onclick={on_mode_toggle}>
                    { mode_label }
                </button>
            </div>
            {
                if let Some(message) = (*error).clone() {
                    html! { <div class="inline-error">{ message }</div> }
                } else {
                    html! {}
                }
            }
            {
                if let Some(parsed) = (*preview).clone() {
                    let on_edit = {
                        let preview = preview.clone();
                        Callback::from(move |edited: ParsedTask| {
                            preview.set(Some(edited));
                        })
                    };
                    preview_editor(
                        parsed,
                        tz,
                        *creating,
                        on_edit,
                        on_cancel_preview,
                        on_create_from_preview,
                    )
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn preview_editor(
    parsed: ParsedTask,
    tz: Tz,
    creating: bool,
    on_edit: Callback<ParsedTask>,
    on_cancel: Callback<yew::MouseEvent>,
    on_create: Callback<yew::MouseEvent>,
) -> Html {
    let title_empty = parsed.title.trim().is_empty();

    let on_title = {
        let on_edit = on_edit.clone();
        let parsed = parsed.clone();
        Callback::from(move |event: InputEvent| {
            let field: HtmlInputElement = event.target_unchecked_into();
            on_edit.emit(ParsedTask {
                title: field.value(),
                ..parsed.clone()
            });
        })
    };

    let on_description = {
        let on_edit = on_edit.clone();
        let parsed = parsed.clone();
        Callback::from(move |event: InputEvent| {
            let field: HtmlInputElement = event.target_unchecked_into();
            on_edit.emit(ParsedTask {
                description: field.value(),
                ..parsed.clone()
            });
        })
    };

    let on_priority = {
        let on_edit = on_edit.clone();
        let parsed = parsed.clone();
        Callback::from(move |event: yew::Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Some(priority) = TaskPriority::parse(&select.value()) {
                on_edit.emit(ParsedTask {
                    priority,
                    ..parsed.clone()
                });
            }
        })
    };

    let on_due = {
        let on_edit = on_edit.clone();
        let parsed = parsed.clone();
        Callback::from(move |event: InputEvent| {
            let field: HtmlInputElement = event.target_unchecked_into();
            let raw = field.value();
            let due_date = if raw.is_empty() {
                None
            } else {
                parse_input_value(&raw, tz)
            };
            on_edit.emit(ParsedTask {
                due_date,
                ..parsed.clone()
            });
        })
    };

    let due_value = parsed
        .due_date
        .map(|due| format_for_input(due, tz))
        .unwrap_or_default();
    let due_hint = parsed
        .due_date
        .map(|due| due.with_timezone(&tz).format("%b %-d %H:%M").to_string());

    html! {
        <div class="parse-preview">
            <div class="preview-header">
                <span>{ "Parsed result (editable)" }</span>
                <button class="btn ghost" onclick={on_cancel.clone()} disabled={creating}>
                    { "✕" }
                </button>
            </div>

            <label>{ "Title" }</label>
            <input
                type="text"
                value={parsed.title.clone()}
                oninput={on_title}
                disabled={creating}
            />

            <label>{ "Description (optional)" }</label>
            <input
                type="text"
                value={parsed.description.clone()}
                oninput={on_description}
                placeholder="Add details..."
                disabled={creating}
            />

            <div class="preview-row">
                <div>
                    <label>{ "Priority" }</label>
                    <select onchange={on_priority} disabled={creating}>
                        {
                            for [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low]
                                .into_iter()
                                .map(|priority| html! {
                                    <option
                                        value={priority.as_str()}
                                        selected={priority == parsed.priority}
                                    >
                                        { priority.as_str() }
                                    </option>
                                })
                        }
                    </select>
                    <PriorityBadge priority={parsed.priority} />
                </div>
                <div>
                    <label>{ "Due" }</label>
                    <input
                        type="datetime-local"
                        value={due_value}
                        oninput={on_due}
                        disabled={creating}
                    />
                    {
                        if let Some(hint) = due_hint {
                            html! { <span class="hint">{ hint }</span> }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>

            <div class="preview-actions">
                <button class="btn" onclick={on_cancel} disabled={creating}>
                    { "Cancel" }
                </button>
                <button
                    class={classes!("btn", "primary")}
                    onclick={on_create}
                    disabled={creating || title_empty}
                >
                    { if creating { "Creating..." } else { "Create task" } }
                </button>
            </div>
        </div>
    }
}
