use taskdeck_core::due::DueStatus;
use yew::{Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct DueDateBadgeProps {
    pub status: DueStatus,
    pub label: String,
}

#[function_component(DueDateBadge)]
pub fn due_date_badge(props: &DueDateBadgeProps) -> Html {
    html! {
        <span class={classes!("badge", props.status.css_class())}>
            { &props.label }
        </span>
    }
}
