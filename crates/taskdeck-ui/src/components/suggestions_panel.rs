use taskdeck_core::task::{TaskCreate, TaskSuggestion};
use yew::{Callback, Html, Properties, function_component, html, use_state};

use super::PriorityBadge;
use crate::api::{create_task, fetch_suggestions};

const SUGGESTION_COUNT: u32 = 3;

#[derive(Properties, PartialEq)]
pub struct SuggestionsPanelProps {
    pub on_created: Callback<()>,
}

/// "Suggest next task" panel: idle until requested, then loading/loaded
/// with manual refresh. Accepting a suggestion creates a task from it and
/// drops only that entry from the visible set; the rest stay as fetched.
/// Failures surface inline and leave the prior state intact.
#[function_component(SuggestionsPanel)]
pub fn suggestions_panel(props: &SuggestionsPanelProps) -> Html {
    let suggestions = use_state(Vec::<TaskSuggestion>::new);
    let loading = use_state(|| false);
    let loaded = use_state(|| false);
    let error = use_state(|| None::<String>);
    let accepting = use_state(|| None::<usize>);

    let load = {
        let suggestions = suggestions.clone();
        let loading = loading.clone();
        let loaded = loaded.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            if *loading {
                return;
            }
            error.set(None);
            loading.set(true);

            let suggestions = suggestions.clone();
            let loading = loading.clone();
            let loaded = loaded.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_suggestions(SUGGESTION_COUNT).await {
                    Ok(response) => {
                        tracing::debug!(
                            count = response.suggestions.len(),
                            cached = response.cached,
                            "suggestions fetched"
                        );
                        suggestions.set(response.suggestions);
                        loaded.set(true);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "suggestions fetch failed");
                        error.set(Some(
                            "Failed to fetch suggestions.".to_string(),
                        ));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_accept = {
        let suggestions = suggestions.clone();
        let error = error.clone();
        let accepting = accepting.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |index: usize| {
            let Some(suggestion) = suggestions.get(index).cloned() else {
                return;
            };
            if accepting.is_some() {
                return;
            }
            error.set(None);
            accepting.set(Some(index));

            let body = TaskCreate {
                priority: Some(suggestion.priority),
                ..TaskCreate::titled(suggestion.title)
            };

            let suggestions = suggestions.clone();
            let error = error.clone();
            let accepting = accepting.clone();
            let on_created = on_created.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match create_task(&body).await {
                    Ok(created) => {
                        tracing::info!(
                            id = %created.id,
                            "task created from suggestion"
                        );
                        let remaining: Vec<TaskSuggestion> = suggestions
                            .iter()
                            .enumerate()
                            .filter(|(i, _)| *i != index)
                            .map(|(_, s)| s.clone())
                            .collect();
                        suggestions.set(remaining);
                        on_created.emit(());
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "suggestion accept failed");
                        error.set(Some("Failed to create task.".to_string()));
                    }
                }
                accepting.set(None);
            });
        })
    };

    let error_block = if let Some(message) = (*error).clone() {
        html! { <div class="inline-error">{ message }</div> }
    } else {
        html! {}
    };

    // Idle: nothing requested yet, show the call-to-action only.
    if !*loaded && !*loading {
        let load = load.clone();
        return html! {
            <div class="suggestions-panel">
                <div class="panel-header">
                    <span>{ "Let AI suggest your next task" }</span>
                    <button class="btn" onclick={move |_| load.emit(())}>
                        { "Show suggestions" }
                    </button>
                </div>
                { error_block }
            </div>
        };
    }

    let refresh = {
        let load = load.clone();
        Callback::from(move |_| load.emit(()))
    };

    html! {
        <div class="suggestions-panel">
            <div class="panel-header">
                <span>{ "Suggested next tasks" }</span>
                <button
                    class="btn ghost"
                    onclick={refresh}
                    disabled={*loading || accepting.is_some()}
                >
                    { if *loading { "Refreshing..." } else { "Refresh" } }
                </button>
            </div>
            { error_block }
            {
                if *loading {
                    html! { <div class="placeholder">{ "Analyzing..." }</div> }
                } else if suggestions.is_empty() {
                    html! {
                        <div class="placeholder">
                            { "No suggestions for the current tasks." }
                        </div>
                    }
                } else {
                    html! {
                        <div class="suggestion-list">
                            {
                                for suggestions.iter().enumerate().map(|(index, suggestion)| {
                                    let on_accept = on_accept.clone();
                                    let is_accepting = *accepting == Some(index);
                                    let disabled = accepting.is_some();
                                    html! {
                                        <div class="suggestion-row">
                                            <div class="suggestion-main">
                                                <span class="suggestion-title">{ &suggestion.title }</span>
                                                <PriorityBadge priority={suggestion.priority} />
                                                <p class="suggestion-reason">{ &suggestion.reason }</p>
                                            </div>
                                            <button
                                                class="btn"
                                                onclick={move |_| on_accept.emit(index)}
                                                {disabled}
                                            >
                                                { if is_accepting { "Adding..." } else { "Add" } }
                                            </button>
                                        </div>
                                    }
                                })
                            }
                        </div>
                    }
                }
            }
        </div>
    }
}
