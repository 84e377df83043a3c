use chrono_tz::Tz;

const API_BASE_STORAGE_KEY: &str = "taskdeck.api_base";
const TIMEZONE_STORAGE_KEY: &str = "taskdeck.timezone";
const FORM_MODE_STORAGE_KEY: &str = "taskdeck.form_mode";

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Task-form interaction mode, persisted across page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Free text goes through the AI parse endpoint and an editable preview.
    Ai,
    /// The text field is the title; submit creates the task immediately.
    Direct,
}

impl FormMode {
    fn storage_value(self) -> &'static str {
        match self {
            FormMode::Ai => "ai",
            FormMode::Direct => "direct",
        }
    }
}

fn storage_get(key: &str) -> Option<String> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(key).ok().flatten())
}

fn storage_set(key: &str, value: &str) {
    if let Some(storage) =
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    {
        let _ = storage.set_item(key, value);
    }
}

/// Backend origin, without a trailing slash. Falls back to the local
/// development address when unset.
pub fn api_base_url() -> String {
    match storage_get(API_BASE_STORAGE_KEY) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().trim_end_matches('/').to_string()
        }
        _ => DEFAULT_API_BASE.to_string(),
    }
}

/// IANA timezone used for due-date display. Invalid or missing values fall
/// back to UTC.
pub fn display_timezone() -> Tz {
    let Some(raw) = storage_get(TIMEZONE_STORAGE_KEY) else {
        return chrono_tz::UTC;
    };
    match raw.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(
                timezone = %raw,
                "invalid display timezone in storage, falling back to UTC"
            );
            chrono_tz::UTC
        }
    }
}

pub fn load_form_mode() -> FormMode {
    match storage_get(FORM_MODE_STORAGE_KEY).as_deref() {
        Some("direct") => FormMode::Direct,
        _ => FormMode::Ai,
    }
}

pub fn save_form_mode(mode: FormMode) {
    storage_set(FORM_MODE_STORAGE_KEY, mode.storage_value());
}
