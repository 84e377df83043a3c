use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of a task's lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Status a completion toggle lands on. Any non-completed status
    /// (pending or in_progress) toggles to completed.
    pub fn toggled(self) -> TaskStatus {
        if self.is_completed() {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<TaskPriority> {
        match raw {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// A task as the backend returns it. The id is opaque to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /api/tasks`. Unset fields are omitted so the backend
/// applies its own defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl TaskCreate {
    pub fn titled(title: impl Into<String>) -> TaskCreate {
        TaskCreate {
            title: title.into(),
            description: None,
            due_date: None,
            status: None,
            priority: None,
        }
    }
}

/// Partial update body for `PUT /api/tasks/{id}`; only set fields serialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> TaskPatch {
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        }
    }
}

/// Paginated collection returned by `GET /api/tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskListResponse {
    pub items: Vec<Task>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Filters for the list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskListQuery {
    pub fn with_limit(limit: u32) -> TaskListQuery {
        TaskListQuery {
            limit: Some(limit),
            ..TaskListQuery::default()
        }
    }

    /// Query-string pairs in a stable order; empty when no filter is set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        pairs
    }
}

/// Body for `POST /api/tasks/parse`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseRequest {
    pub text: String,
}

/// Ephemeral natural-language parse preview. Not persisted until the user
/// confirms it into a `TaskCreate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseResponse {
    pub original_text: String,
    pub parsed: ParsedTask,
}

/// Ephemeral AI-sourced candidate task; accepted into a real task or
/// discarded, never stored on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskSuggestion {
    pub title: String,
    pub reason: String,
    pub priority: TaskPriority,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestResponse {
    pub suggestions: Vec<TaskSuggestion>,
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{
        ParseResponse, SuggestResponse, Task, TaskListQuery, TaskPatch,
        TaskPriority, TaskStatus,
    };

    #[test]
    fn task_deserializes_from_backend_shape() {
        let raw = r#"{
            "id": "a1b2c3",
            "title": "Buy milk",
            "description": "",
            "due_date": "2026-03-01T12:00:00Z",
            "status": "pending",
            "priority": "low",
            "created_at": "2026-02-20T08:30:00Z"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("decode task");
        assert_eq!(task.id, "a1b2c3");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Low);
        let due = task.due_date.expect("due date present");
        assert_eq!(
            due,
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
                .single()
                .expect("valid due")
        );
    }

    #[test]
    fn task_tolerates_missing_description_and_null_due() {
        let raw = r#"{
            "id": "x",
            "title": "No frills",
            "due_date": null,
            "status": "in_progress",
            "priority": "high",
            "created_at": "2026-02-20T08:30:00Z"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("decode task");
        assert_eq!(task.description, "");
        assert!(task.due_date.is_none());
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = TaskPatch::status(TaskStatus::Completed);
        let body = serde_json::to_string(&patch).expect("encode patch");
        assert_eq!(body, r#"{"status":"completed"}"#);
    }

    #[test]
    fn toggle_maps_every_status_to_its_counterpart() {
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
    }

    #[test]
    fn parse_response_follows_documented_contract() {
        // The AI output itself is external; this pins the envelope shape.
        let raw = r#"{
            "original_text": "report due tomorrow, high priority",
            "parsed": {
                "title": "Submit report",
                "description": "",
                "due_date": "2026-02-18T17:00:00Z",
                "priority": "high"
            }
        }"#;
        let response: ParseResponse =
            serde_json::from_str(raw).expect("decode parse response");
        assert_eq!(
            response.original_text,
            "report due tomorrow, high priority"
        );
        assert_eq!(response.parsed.priority, TaskPriority::High);
        let due = response.parsed.due_date.expect("due date present");
        assert_eq!(
            due,
            Utc.with_ymd_and_hms(2026, 2, 18, 17, 0, 0)
                .single()
                .expect("valid due")
        );
    }

    #[test]
    fn suggest_response_follows_documented_contract() {
        let raw = r#"{
            "suggestions": [
                {
                    "title": "Review open invoices",
                    "reason": "Two invoice tasks are overdue",
                    "priority": "medium"
                }
            ],
            "cached": true
        }"#;
        let response: SuggestResponse =
            serde_json::from_str(raw).expect("decode suggest response");
        assert!(response.cached);
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(
            response.suggestions[0].priority,
            TaskPriority::Medium
        );
    }

    #[test]
    fn query_pairs_skip_unset_filters() {
        let query = TaskListQuery::with_limit(100);
        assert_eq!(query.query_pairs(), vec![("limit", "100".to_string())]);

        let full = TaskListQuery {
            limit: Some(20),
            offset: Some(40),
            status: Some(TaskStatus::Pending),
            priority: Some(TaskPriority::High),
        };
        let pairs = full.query_pairs();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[2], ("status", "pending".to_string()));
        assert_eq!(pairs[3], ("priority", "high".to_string()));
    }
}
