use taskdeck_core::task::{Task, TaskListQuery};
use yew::{Callback, Html, function_component, html, use_effect_with, use_state};

use crate::api::list_tasks;
use crate::components::{SuggestionsPanel, TaskForm, TaskList};

const PAGE_LIMIT: u32 = 100;

/// Top-level page. Owns the authoritative task snapshot; children receive
/// it read-only and signal mutations back up, which bump `refresh_tick`
/// and trigger a full reload. The last reload to land wins.
#[function_component(App)]
pub fn app() -> Html {
    let tasks = use_state(Vec::<Task>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);
    let refresh_tick = use_state(|| 0_u64);

    {
        let tasks = tasks.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();

        use_effect_with(*refresh_tick, move |tick| {
            let tick = *tick;
            let tasks = tasks.clone();
            let loading = loading.clone();
            let load_error = load_error.clone();

            wasm_bindgen_futures::spawn_local(async move {
                tracing::info!(tick, "refreshing task list");

                match list_tasks(&TaskListQuery::with_limit(PAGE_LIMIT)).await {
                    Ok(page) => {
                        tracing::debug!(
                            total = page.total,
                            fetched = page.items.len(),
                            "task list refreshed"
                        );
                        tasks.set(page.items);
                        load_error.set(None);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "task list refresh failed");
                        load_error.set(Some("Failed to load tasks.".to_string()));
                    }
                }
                loading.set(false);
            });

            || ()
        });
    }

    let on_changed = {
        let refresh_tick = refresh_tick.clone();
        Callback::from(move |_: ()| {
            refresh_tick.set(*refresh_tick + 1);
        })
    };

    let body = if *loading {
        html! { <div class="placeholder">{ "Loading tasks..." }</div> }
    } else if let Some(message) = (*load_error).clone() {
        html! { <div class="placeholder error">{ message }</div> }
    } else {
        html! {
            <TaskList
                tasks={(*tasks).clone()}
                on_changed={on_changed.clone()}
            />
        }
    };

    html! {
        <div class="page">
            <main class="container">
                <div class="card">
                    <div class="card-header">{ "Taskdeck" }</div>
                    <div class="card-body">
                        <TaskForm on_created={on_changed.clone()} />
                        <SuggestionsPanel on_created={on_changed.clone()} />
                        { body }
                    </div>
                </div>
            </main>
        </div>
    }
}
