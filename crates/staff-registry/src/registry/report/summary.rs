//! Shared report selection, filter options, and aggregate statistics.
//!
//! `select` is the single ordering authority: the preview rows and the PDF
//! export both go through it, so the two surfaces always agree.

use std::collections::{BTreeMap, BTreeSet};

use super::filter::{normalize_zone, ReportFilter};
use super::views::{FilterOptionsView, ReportStatisticsView, ReportView};
use crate::registry::profiles::domain::EmployeeProfile;
use crate::registry::profiles::views::ProfileSummaryView;

/// Filtered subset, newest first, id descending as the tie-break.
pub fn select<'a>(
    profiles: &'a [EmployeeProfile],
    filter: &ReportFilter,
) -> Vec<&'a EmployeeProfile> {
    let mut selected: Vec<&EmployeeProfile> = profiles
        .iter()
        .filter(|profile| filter.matches(profile))
        .collect();
    selected.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    selected
}

/// Distinct filter choices from the unfiltered set: trimmed, deduplicated,
/// alphabetically sorted. Zones are shown in normalized form, so three
/// spellings of one zone collapse to a single entry.
pub fn filter_options(profiles: &[EmployeeProfile]) -> FilterOptionsView {
    let mut agencies = BTreeSet::new();
    let mut duty_stations = BTreeSet::new();
    let mut contact_types = BTreeSet::new();
    let mut zones = BTreeSet::new();

    for profile in profiles {
        agencies.insert(profile.agency.code().to_string());
        duty_stations.insert(profile.duty_station.code().to_string());
        contact_types.insert(profile.contact_type.code().to_string());

        let zone = normalize_zone(&profile.zone);
        if !zone.is_empty() {
            zones.insert(zone);
        }
    }

    FilterOptionsView {
        agencies: agencies.into_iter().collect(),
        duty_stations: duty_stations.into_iter().collect(),
        contact_types: contact_types.into_iter().collect(),
        zones: zones.into_iter().collect(),
    }
}

fn bump(counts: &mut BTreeMap<String, usize>, key: impl Into<String>) {
    *counts.entry(key.into()).or_insert(0) += 1;
}

/// Group-by counts over the currently filtered subset.
pub fn statistics(selected: &[&EmployeeProfile]) -> ReportStatisticsView {
    let mut stats = ReportStatisticsView::default();

    for profile in selected {
        bump(&mut stats.by_agency, profile.agency.code());
        bump(&mut stats.by_duty_station, profile.duty_station.code());
        bump(
            &mut stats.by_nationality,
            profile.nationality.trim().to_lowercase(),
        );
        bump(&mut stats.by_contact_type, profile.contact_type.code());
        bump(&mut stats.by_gender, profile.gender.code());
        bump(&mut stats.by_creator_role, profile.created_by_role.code());
    }

    stats
}

/// Assemble the full preview payload for one filter combination.
pub fn build_report(profiles: &[EmployeeProfile], filter: &ReportFilter) -> ReportView {
    let selected = select(profiles, filter);

    ReportView {
        filter_description: filter.describe(),
        filters: filter.clone(),
        total_profiles: profiles.len(),
        matched_profiles: selected.len(),
        rows: selected
            .iter()
            .map(|profile| ProfileSummaryView::from_profile(profile))
            .collect(),
        options: filter_options(profiles),
        statistics: statistics(&selected),
    }
}
