//! Report PDF composition: title band, metadata block, paginated grid table.

use chrono::{DateTime, Duration, Utc};

use super::pdf::{fit_text, Font, PageContent, PdfWriter, A4_WIDTH};
use crate::registry::profiles::domain::EmployeeProfile;

const MARGIN: f32 = 50.0;
const CONTENT_WIDTH: f32 = A4_WIDTH - 2.0 * MARGIN;
const ROW_HEIGHT: f32 = 18.0;
const TABLE_TOP_FIRST: f32 = 700.0;
const TABLE_TOP_NEXT: f32 = 780.0;
/// Data rows per page, header row excluded.
const ROWS_FIRST_PAGE: usize = 35;
const ROWS_NEXT_PAGE: usize = 39;

const COLUMNS: [(&str, f32); 6] = [
    ("Name", 115.28),
    ("Employee ID", 75.0),
    ("Agency", 80.0),
    ("Duty Station", 80.0),
    ("Contact Type", 80.0),
    ("Created Date", 65.0),
];

/// Clock offset of the duty station (UTC+6) for the metadata line.
const DUTY_STATION_OFFSET_HOURS: i64 = 6;

/// One table row, already formatted for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub employee_id: String,
    pub agency: String,
    pub duty_station: String,
    pub contact_type: String,
    pub created: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 6] {
        [
            &self.name,
            &self.employee_id,
            &self.agency,
            &self.duty_station,
            &self.contact_type,
            &self.created,
        ]
    }
}

/// Format the shared selection into printable rows. The caller passes the
/// already filtered and ordered subset from `summary::select`.
pub fn export_rows(selected: &[&EmployeeProfile]) -> Vec<ExportRow> {
    selected
        .iter()
        .map(|profile| ExportRow {
            name: profile.name.clone(),
            employee_id: profile.employee_id.clone(),
            agency: profile.agency.label().to_string(),
            duty_station: profile.duty_station.label().to_string(),
            contact_type: profile.contact_type.label().to_string(),
            created: profile.created_at.format("%b %d, %Y").to_string(),
        })
        .collect()
}

fn draw_header_row(page: &mut PageContent, top: f32) {
    page.fill_rgb(0.118, 0.251, 0.686)
        .fill_rect(MARGIN, top - ROW_HEIGHT, CONTENT_WIDTH, ROW_HEIGHT);

    let mut x = MARGIN;
    page.fill_rgb(1.0, 1.0, 1.0);
    for (label, width) in COLUMNS {
        page.text(
            Font::HelveticaBold,
            10.0,
            x + 4.0,
            top - ROW_HEIGHT + 5.0,
            label,
        );
        x += width;
    }
}

fn draw_data_row(page: &mut PageContent, top: f32, row: &ExportRow, shaded: bool) {
    if shaded {
        page.fill_rgb(0.961, 0.961, 0.863)
            .fill_rect(MARGIN, top - ROW_HEIGHT, CONTENT_WIDTH, ROW_HEIGHT);
    }

    let mut x = MARGIN;
    page.fill_rgb(0.0, 0.0, 0.0);
    for (cell, (_, width)) in row.cells().into_iter().zip(COLUMNS) {
        page.text(
            Font::Helvetica,
            9.0,
            x + 4.0,
            top - ROW_HEIGHT + 5.0,
            &fit_text(cell, width - 8.0, 9.0),
        );
        x += width;
    }
}

fn draw_grid(page: &mut PageContent, top: f32, rows: usize) {
    page.line_width(0.5);
    let height = (rows + 1) as f32 * ROW_HEIGHT;

    let mut x = MARGIN;
    for row_index in 0..=rows {
        let y = top - (row_index + 1) as f32 * ROW_HEIGHT;
        page.stroke_rect(MARGIN, y, CONTENT_WIDTH, ROW_HEIGHT);
    }
    for (_, width) in COLUMNS {
        page.stroke_rect(x, top - height, width, height);
        x += width;
    }
}

fn metadata_block(
    page: &mut PageContent,
    matched: usize,
    filter_description: &str,
    generated_at: DateTime<Utc>,
) {
    let station_clock = generated_at + Duration::hours(DUTY_STATION_OFFSET_HOURS);
    let generated = station_clock.format("%B %d, %Y at %I:%M %p").to_string();

    page.fill_rgb(0.5, 0.5, 0.5);
    page.text(
        Font::Helvetica,
        10.0,
        MARGIN,
        755.0,
        &format!("Generated on: {generated}"),
    );
    page.text(
        Font::Helvetica,
        10.0,
        MARGIN,
        741.0,
        &format!("Total Profiles: {matched}"),
    );
    page.text(
        Font::Helvetica,
        10.0,
        MARGIN,
        727.0,
        &fit_text(
            &format!("Filters Applied: {filter_description}"),
            CONTENT_WIDTH,
            10.0,
        ),
    );
}

/// Render the filtered selection into a paginated A4 document. The
/// generation timestamp is an input, not sampled here, so identical inputs
/// yield identical bytes.
pub fn render_report_pdf(
    rows: &[ExportRow],
    filter_description: &str,
    generated_at: DateTime<Utc>,
) -> Vec<u8> {
    let mut writer = PdfWriter::new();

    let mut first_page = PageContent::new();
    first_page.fill_rgb(0.118, 0.251, 0.686).text_centered(
        Font::HelveticaBold,
        18.0,
        A4_WIDTH / 2.0,
        790.0,
        "Employee Profiles Report",
    );
    metadata_block(&mut first_page, rows.len(), filter_description, generated_at);

    if rows.is_empty() {
        first_page.fill_rgb(0.5, 0.5, 0.5).text_centered(
            Font::Helvetica,
            14.0,
            A4_WIDTH / 2.0,
            650.0,
            "No profiles found with the applied filters.",
        );
        writer.add_page(first_page);
        return writer.finish();
    }

    let mut remaining = rows;
    let mut page = first_page;
    let mut top = TABLE_TOP_FIRST;
    let mut capacity = ROWS_FIRST_PAGE;

    loop {
        let take = remaining.len().min(capacity);
        let (chunk, rest) = remaining.split_at(take);

        draw_header_row(&mut page, top);
        for (index, row) in chunk.iter().enumerate() {
            let row_top = top - (index + 1) as f32 * ROW_HEIGHT;
            draw_data_row(&mut page, row_top, row, index % 2 == 1);
        }
        draw_grid(&mut page, top, chunk.len());
        writer.add_page(page);

        if rest.is_empty() {
            break;
        }
        remaining = rest;
        page = PageContent::new();
        top = TABLE_TOP_NEXT;
        capacity = ROWS_NEXT_PAGE;
    }

    writer.finish()
}
