//! Slack incoming-webhook message model and the builder that fills it from [`Settings`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::NotifyResult;

/// Title/value pair rendered as a column inside the attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageField {
    pub title: String,
    pub value: String,
    /// Always sent, always empty.
    #[serde(default)]
    pub short: String,
}

impl MessageField {
    fn new(title: &str, value: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            short: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageAttachment {
    pub fallback: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    pub title: String,
    pub title_link: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<MessageField>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub thumb_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub footer: String,
}

/// Top-level body of the webhook request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboundPayload {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<MessageAttachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl OutboundPayload {
    pub fn to_json(&self) -> NotifyResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Error color wins only when the build failed and one was configured.
pub fn select_color(settings: &Settings) -> &str {
    if settings.is_build_failed {
        if settings.color_on_error.is_empty() {
            info!("Build failed but no color_on_error defined, using default.");
        } else {
            return &settings.color_on_error;
        }
    }
    &settings.color
}

/// Fields are only shown for successful builds. The second pair is never
/// shown without the first.
pub fn select_fields(settings: &Settings) -> Vec<MessageField> {
    if !settings.is_build_succeed || settings.field_title_1.is_empty() {
        return Vec::new();
    }

    let mut fields = vec![MessageField::new(
        &settings.field_title_1,
        &settings.field_detail_1,
    )];
    if !settings.field_title_2.is_empty() {
        fields.push(MessageField::new(
            &settings.field_title_2,
            &settings.field_detail_2,
        ));
    }
    fields
}

pub fn build_payload(settings: &Settings) -> OutboundPayload {
    let attachment = MessageAttachment {
        fallback: settings.title.clone(),
        color: select_color(settings).to_string(),
        title: settings.title.clone(),
        title_link: settings.title_link.clone(),
        text: String::new(),
        fields: select_fields(settings),
        thumb_url: settings.thumb_url.clone(),
        footer: settings.footer.clone(),
    };

    let mut payload = OutboundPayload {
        attachments: vec![attachment],
        channel: non_empty(&settings.channel),
        username: non_empty(&settings.from_username),
        icon_url: non_empty(&settings.icon_url),
        ..Default::default()
    };

    // An icon URL overrides any emoji icon.
    if payload.icon_url.is_some() {
        payload.icon_emoji = None;
    }

    debug!("Parameters: {:#?}", payload);
    payload
}
