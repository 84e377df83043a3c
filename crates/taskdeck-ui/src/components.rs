mod due_date_badge;
mod priority_badge;
mod suggestions_panel;
mod task_form;
mod task_item;
mod task_list;

pub use due_date_badge::DueDateBadge;
pub use priority_badge::PriorityBadge;
pub use suggestions_panel::SuggestionsPanel;
pub use task_form::TaskForm;
pub use task_item::TaskItem;
pub use task_list::TaskList;
