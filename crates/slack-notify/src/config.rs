use crate::error::{NotifyError, NotifyResult};

/// Value of `STEPLIB_BUILD_STATUS` reported by a successful build.
const BUILD_STATUS_SUCCESS: &str = "0";

/// Step inputs, read once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub webhook_url: String,
    pub channel: String,
    pub from_username: String,
    pub title: String,
    pub title_link: String,
    pub footer: String,
    pub field_title_1: String,
    pub field_detail_1: String,
    pub field_title_2: String,
    pub field_detail_2: String,
    pub color: String,
    pub color_on_error: String,
    pub thumb_url: String,
    pub icon_url: String,

    pub is_debug_mode: bool,
    pub is_build_failed: bool,
    pub is_build_succeed: bool,
}

impl Settings {
    /// Load settings from the process environment. Never fails; see [`Settings::validate`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup (a missing key reads as unset).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();
        let build_status = lookup("STEPLIB_BUILD_STATUS");

        Settings {
            webhook_url: var("webhook_url"),
            channel: var("channel"),
            from_username: var("from_username"),
            title: var("title"),
            title_link: var("title_link"),
            footer: var("footer"),
            field_title_1: var("field_title_1"),
            field_detail_1: var("field_detail_1"),
            field_title_2: var("field_title_2"),
            field_detail_2: var("field_detail_2"),
            color: var("color"),
            color_on_error: var("color_on_error"),
            thumb_url: var("thumb_url"),
            icon_url: var("icon_url"),

            is_debug_mode: var("is_debug_mode") == "yes",
            // Both flags come from the same variable; an unset status counts as failed.
            is_build_failed: build_status.as_deref() != Some(BUILD_STATUS_SUCCESS),
            is_build_succeed: build_status.as_deref() == Some(BUILD_STATUS_SUCCESS),
        }
    }

    /// Check the two required inputs, webhook URL first.
    pub fn validate(&self) -> NotifyResult<()> {
        if self.webhook_url.is_empty() {
            return Err(NotifyError::MissingRequiredInput(
                "No Webhook URL parameter specified!",
            ));
        }
        if self.color.is_empty() {
            return Err(NotifyError::MissingRequiredInput(
                "No Color parameter specified!",
            ));
        }
        Ok(())
    }

    /// Rows for the "Slack configs" summary, in input order.
    pub fn slack_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("WebhookURL", self.webhook_url.clone()),
            ("Channel", self.channel.clone()),
            ("FromUsername", self.from_username.clone()),
            ("Title", self.title.clone()),
            ("TitleLink", self.title_link.clone()),
            ("Footer", self.footer.clone()),
            ("FieldTitle1", self.field_title_1.clone()),
            ("FieldDetail1", self.field_detail_1.clone()),
            ("FieldTitle2", self.field_title_2.clone()),
            ("FieldDetail2", self.field_detail_2.clone()),
            ("Color", self.color.clone()),
            ("ColorOnError", self.color_on_error.clone()),
            ("ThumbURL", self.thumb_url.clone()),
            ("IconURL", self.icon_url.clone()),
        ]
    }

    /// Rows for the "Other configs" summary.
    pub fn other_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("IsDebugMode", self.is_debug_mode.to_string()),
            ("IsBuildFailed", self.is_build_failed.to_string()),
            ("IsBuildSucceed", self.is_build_succeed.to_string()),
        ]
    }
}
