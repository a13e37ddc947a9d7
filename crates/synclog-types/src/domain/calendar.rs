use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::{split_fields, unquote};
use crate::ExtraData;

const DEFAULT_COLOR: &str = "#000000";

/// Color description as printed for sRGB colors, e.g.
/// `sRGB IEC61966-2.1 colorspace 0.8 0.2 0.1 1`
static SRGB_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^sRGB.*colorspace ([0-9.]+) ([0-9.]+) ([0-9.]+) ([0-9.]+)").unwrap()
});

/// A calendar, as listed in the `Calendars` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Calendar {
    pub title: String,
    pub account_id: String,
    pub id: String,
    #[serde(default)]
    pub extra_data: Option<ExtraData>,
}

impl Calendar {
    pub fn new(
        title: impl Into<String>,
        account_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            account_id: account_id.into(),
            id: id.into(),
            extra_data: None,
        }
    }

    /// Build a calendar from a group item of the form `title, accountId, id[, ...]`.
    ///
    /// Returns `None` when the account id or calendar id is missing or empty.
    pub fn from_log_entry(entry: &str) -> Option<Self> {
        let fields = split_fields(entry, 4)?;
        let (account_id, id) = (fields[1], fields[2]);
        if account_id.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(unquote(fields[0]), account_id, id))
    }

    /// `#RRGGBB` color from the `color` field, black when unknown.
    pub fn color_hex(&self) -> String {
        let Some(color) = self
            .extra_data
            .as_ref()
            .and_then(|data| data.get_string_field("color"))
        else {
            return DEFAULT_COLOR.to_string();
        };

        let Some(caps) = SRGB_COLOR_REGEX.captures(color) else {
            return DEFAULT_COLOR.to_string();
        };

        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            let Ok(value) = caps[i + 1].parse::<f64>() else {
                return DEFAULT_COLOR.to_string();
            };
            *channel = (value * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        format!(
            "#{:02X}{:02X}{:02X}",
            channels[0], channels[1], channels[2]
        )
    }
}
