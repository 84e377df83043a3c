use taskdeck_core::task::TaskPriority;
use yew::{Html, Properties, classes, function_component, html};

/// Fixed display mapping: high is the destructive variant, medium the
/// default, low the secondary.
fn variant(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "destructive",
        TaskPriority::Medium => "default",
        TaskPriority::Low => "secondary",
    }
}

#[derive(Properties, PartialEq)]
pub struct PriorityBadgeProps {
    pub priority: TaskPriority,
}

#[function_component(PriorityBadge)]
pub fn priority_badge(props: &PriorityBadgeProps) -> Html {
    html! {
        <span class={classes!("badge", variant(props.priority))}>
            { props.priority.as_str() }
        </span>
    }
}
