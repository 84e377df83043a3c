use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::task::Task;

/// Urgency bucket for a due timestamp, used purely for display styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Urgent,
    Upcoming,
    Normal,
}

impl DueStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            DueStatus::Overdue => "due-overdue",
            DueStatus::Urgent => "due-urgent",
            DueStatus::Upcoming => "due-upcoming",
            DueStatus::Normal => "due-normal",
        }
    }
}

/// Buckets a due instant relative to `now`. Past instants are overdue no
/// matter how far past; then urgent within 24h, upcoming within 72h.
///
/// The overdue check runs first, so a due time earlier today that has
/// already elapsed is overdue, never "today".
pub fn classify(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<DueStatus> {
    let due = due?;
    if due < now {
        return Some(DueStatus::Overdue);
    }
    let until = due - now;
    if until <= Duration::hours(24) {
        Some(DueStatus::Urgent)
    } else if until <= Duration::hours(72) {
        Some(DueStatus::Upcoming)
    } else {
        Some(DueStatus::Normal)
    }
}

/// Human-readable due label rendered in the display timezone.
pub fn format_due(
    due: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<String> {
    let due = due?;

    if due < now {
        return Some(format!("expired {} ago", humanize(now - due)));
    }

    let due_local = due.with_timezone(&tz);
    let now_local = now.with_timezone(&tz);
    let today = now_local.date_naive();

    if due_local.date_naive() == today {
        return Some(format!("today {}", due_local.format("%H:%M")));
    }
    if today
        .succ_opt()
        .is_some_and(|tomorrow| due_local.date_naive() == tomorrow)
    {
        return Some(format!("tomorrow {}", due_local.format("%H:%M")));
    }

    let until = due - now;
    if until <= Duration::hours(72) {
        return Some(format!("in {}", humanize(until)));
    }

    Some(due_local.format("%b %-d %H:%M").to_string())
}

/// Badge content for a task row, or `None` when no badge should render.
/// Completed tasks never show a due badge regardless of their due date.
pub fn badge_for(
    task: &Task,
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<(DueStatus, String)> {
    if task.status.is_completed() {
        return None;
    }
    let status = classify(task.due_date, now)?;
    let label = format_due(task.due_date, now, tz)?;
    Some((status, label))
}

/// Value for an `<input type="datetime-local">` in the display timezone.
pub fn format_for_input(due: DateTime<Utc>, tz: Tz) -> String {
    due.with_timezone(&tz).format("%Y-%m-%dT%H:%M").to_string()
}

/// Parses a `datetime-local` value back to a UTC instant. Ambiguous local
/// times (DST fold) resolve to the earlier instant; gaps yield `None`.
pub fn parse_input_value(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok()?;
    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => return None,
    };
    Some(local.with_timezone(&Utc))
}

fn humanize(delta: Duration) -> String {
    let minutes = delta.num_minutes();
    let hours = delta.num_hours();
    let days = delta.num_days();

    if days >= 2 {
        format!("{days} days")
    } else if hours > 1 {
        format!("{hours} hours")
    } else if hours == 1 {
        "1 hour".to_string()
    } else if minutes > 1 {
        format!("{minutes} minutes")
    } else {
        "moments".to_string()
    }
}
