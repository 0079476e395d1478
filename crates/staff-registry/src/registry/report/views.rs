use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::ReportFilter;
use crate::registry::profiles::views::ProfileSummaryView;

/// Distinct values for each filter widget, always computed from the full
/// unfiltered record set so every possible choice stays visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptionsView {
    pub agencies: Vec<String>,
    pub duty_stations: Vec<String>,
    pub contact_types: Vec<String>,
    pub zones: Vec<String>,
}

/// Group-by counts over the filtered subset. BTreeMaps keep the key order
/// deterministic for display and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportStatisticsView {
    pub by_agency: BTreeMap<String, usize>,
    pub by_duty_station: BTreeMap<String, usize>,
    pub by_nationality: BTreeMap<String, usize>,
    pub by_contact_type: BTreeMap<String, usize>,
    pub by_gender: BTreeMap<String, usize>,
    pub by_creator_role: BTreeMap<String, usize>,
}

/// Full report preview payload.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub filters: ReportFilter,
    pub filter_description: String,
    pub total_profiles: usize,
    pub matched_profiles: usize,
    pub rows: Vec<ProfileSummaryView>,
    pub options: FilterOptionsView,
    pub statistics: ReportStatisticsView,
}
