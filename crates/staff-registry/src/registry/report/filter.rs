//! Report filter criteria: optional, AND-combined, shared verbatim between
//! the preview and the PDF export so the two can never drift.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::profiles::domain::EmployeeProfile;

/// Raw query parameters as they arrive on the wire. Unparseable dates are
/// dropped rather than rejected, matching the behavior this report grew
/// out of.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub agency: Option<String>,
    pub duty_station: Option<String>,
    pub contact_type: Option<String>,
    pub zone: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Parsed filter set. String criteria match stored codes case-insensitively;
/// the zone criterion is whitespace-normalized on both sides because zones
/// are stored free-text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty_station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_query_date(value: &Option<String>) -> Option<NaiveDate> {
    non_empty(value).and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

/// Canonical form for free-text zone values: trimmed, inner whitespace runs
/// collapsed, each word title-cased. `" dhaka  NORTH "` becomes
/// `"Dhaka North"`.
pub fn normalize_zone(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl ReportFilter {
    pub fn from_query(query: &ReportQuery) -> Self {
        Self {
            agency: non_empty(&query.agency),
            duty_station: non_empty(&query.duty_station),
            contact_type: non_empty(&query.contact_type),
            zone: non_empty(&query.zone).map(|raw| normalize_zone(&raw)),
            date_from: parse_query_date(&query.date_from),
            date_to: parse_query_date(&query.date_to),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// All criteria combined with logical AND.
    pub fn matches(&self, profile: &EmployeeProfile) -> bool {
        if let Some(agency) = &self.agency {
            if !agency.eq_ignore_ascii_case(profile.agency.code()) {
                return false;
            }
        }
        if let Some(duty_station) = &self.duty_station {
            if !duty_station.eq_ignore_ascii_case(profile.duty_station.code()) {
                return false;
            }
        }
        if let Some(contact_type) = &self.contact_type {
            if !contact_type.eq_ignore_ascii_case(profile.contact_type.code()) {
                return false;
            }
        }
        if let Some(zone) = &self.zone {
            if *zone != normalize_zone(&profile.zone) {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            match day_start(from) {
                Some(lower) if profile.created_at >= lower => {}
                _ => return false,
            }
        }
        if let Some(to) = self.date_to {
            // Inclusive of the entire end day: upper bound is to + 1 day,
            // exclusive.
            if let Some(upper) = to.succ_opt().and_then(day_start) {
                if profile.created_at >= upper {
                    return false;
                }
            }
        }

        true
    }

    /// Human-readable description for the export metadata block.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(agency) = &self.agency {
            parts.push(format!("Agency: {agency}"));
        }
        if let Some(duty_station) = &self.duty_station {
            parts.push(format!("Duty Station: {duty_station}"));
        }
        if let Some(contact_type) = &self.contact_type {
            parts.push(format!("Contact Type: {contact_type}"));
        }
        if let Some(zone) = &self.zone {
            parts.push(format!("Zone: {zone}"));
        }
        if let Some(from) = self.date_from {
            parts.push(format!("From: {}", from.format("%Y-%m-%d")));
        }
        if let Some(to) = self.date_to {
            parts.push(format!("To: {}", to.format("%Y-%m-%d")));
        }

        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join(", ")
        }
    }
}
