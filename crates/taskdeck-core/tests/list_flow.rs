use chrono::{Duration, TimeZone, Utc};
use taskdeck_core::due::{DueStatus, badge_for};
use taskdeck_core::list::{ListOverlay, TaskMutation, sort_for_display};
use taskdeck_core::task::{Task, TaskPriority, TaskStatus};

/// Minimal stand-in for the backend collection: holds the authoritative
/// list and answers reloads, so the optimistic overlay can be driven
/// through a full apply / confirm / reload cycle.
struct FakeBackend {
    tasks: Vec<Task>,
    next_id: u32,
}

impl FakeBackend {
    fn new() -> FakeBackend {
        FakeBackend {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    fn create(&mut self, title: &str, priority: TaskPriority) -> String {
        let id = format!("task-{}", self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id: id.clone(),
            title: title.to_string(),
            description: String::new(),
            due_date: None,
            status: TaskStatus::Pending,
            priority,
            created_at: now(),
        });
        id
    }

    fn set_status(&mut self, id: &str, status: TaskStatus) {
        for task in &mut self.tasks {
            if task.id == id {
                task.status = status;
            }
        }
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    fn list(&self) -> Vec<Task> {
        self.tasks.clone()
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
        .single()
        .expect("valid now")
}

#[test]
fn create_toggle_reload_toggle_lifecycle() {
    let mut backend = FakeBackend::new();
    let id = backend.create("Buy milk", TaskPriority::Low);

    let mut snapshot = backend.list();
    assert_eq!(snapshot[0].status, TaskStatus::Pending);

    // Toggle: optimistic delta first, then the confirmed server write and
    // the authoritative reload.
    let mut overlay = ListOverlay::default();
    overlay.begin(1, TaskMutation::ToggleStatus { id: id.clone() });
    let view = overlay.project(&snapshot);
    assert_eq!(view[0].status, TaskStatus::Completed);

    backend.set_status(&id, TaskStatus::Completed);
    overlay.confirm(1);
    snapshot = backend.list();
    overlay.reconcile();

    let view = overlay.project(&snapshot);
    assert_eq!(view[0].status, TaskStatus::Completed);
    assert!(!overlay.is_transitioning());

    // Toggle again returns to pending.
    overlay.begin(2, TaskMutation::ToggleStatus { id: id.clone() });
    backend.set_status(&id, TaskStatus::Pending);
    overlay.confirm(2);
    snapshot = backend.list();
    overlay.reconcile();

    let view = overlay.project(&snapshot);
    assert_eq!(view[0].status, TaskStatus::Pending);
}

#[test]
fn delete_removes_from_view_and_subsequent_reload() {
    let mut backend = FakeBackend::new();
    let keep = backend.create("Keep me", TaskPriority::Medium);
    let doomed = backend.create("Drop me", TaskPriority::High);

    let snapshot = backend.list();
    let mut overlay = ListOverlay::default();
    overlay.begin(1, TaskMutation::Remove { id: doomed.clone() });

    let view = overlay.project(&snapshot);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, keep);

    assert!(backend.delete(&doomed));
    overlay.confirm(1);
    let snapshot = backend.list();
    overlay.reconcile();

    let view = overlay.project(&snapshot);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, keep);
}

#[test]
fn failed_delete_of_missing_task_rolls_back_cleanly() {
    let mut backend = FakeBackend::new();
    let id = backend.create("Only task", TaskPriority::Low);

    let snapshot = backend.list();
    let mut overlay = ListOverlay::default();
    overlay.begin(1, TaskMutation::Remove { id: "ghost".to_string() });

    // Server answers 404; the delta is rolled back and nothing changed.
    assert!(!backend.delete("ghost"));
    overlay.rollback(1);

    let view = overlay.project(&snapshot);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, id);
    assert!(!overlay.is_transitioning());
}

#[test]
fn badge_buckets_follow_due_distance() {
    let mut backend = FakeBackend::new();
    backend.create("urgent", TaskPriority::Medium);
    backend.create("overdue", TaskPriority::Medium);
    backend.create("undated", TaskPriority::Medium);

    let mut tasks = backend.list();
    tasks[0].due_date = Some(now() + Duration::hours(12));
    tasks[1].due_date = Some(now() - Duration::days(1));

    let (status, _) =
        badge_for(&tasks[0], now(), chrono_tz::UTC).expect("urgent badge");
    assert_eq!(status, DueStatus::Urgent);

    let (status, _) =
        badge_for(&tasks[1], now(), chrono_tz::UTC).expect("overdue badge");
    assert_eq!(status, DueStatus::Overdue);

    assert!(badge_for(&tasks[2], now(), chrono_tz::UTC).is_none());
}

#[test]
fn display_sort_over_projection_keeps_completed_last() {
    let mut backend = FakeBackend::new();
    let first = backend.create("first", TaskPriority::Low);
    backend.create("second", TaskPriority::Low);
    backend.create("third", TaskPriority::Low);

    let snapshot = backend.list();
    let mut overlay = ListOverlay::default();
    overlay.begin(1, TaskMutation::ToggleStatus { id: first.clone() });

    let mut view = overlay.project(&snapshot);
    sort_for_display(&mut view);

    let order: Vec<&str> = view.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(order, vec!["task-2", "task-3", "task-1"]);
    assert_eq!(view[2].status, TaskStatus::Completed);
}
