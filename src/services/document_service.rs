use std::error::Error;
use std::fmt;

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Style, StyledString};
use genpdf::{Document, SimplePageDecorator};

use crate::models::plan::ItineraryPlan;

const FONT_NAME: &str = "LiberationSans";

// Try several system locations; PDF_FONT_DIR takes precedence when set.
const FONT_DIRS: &[&str] = &[
    "",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
    "/System/Library/Fonts",
    "/Library/Fonts",
];

#[derive(Debug)]
pub enum RenderError {
    EmptyPlan,
    FontUnavailable(String),
    Pdf(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::EmptyPlan => {
                write!(f, "The itinerary has no days, nothing to export")
            }
            RenderError::FontUnavailable(msg) => write!(f, "Font unavailable: {}", msg),
            RenderError::Pdf(msg) => write!(f, "PDF error: {}", msg),
        }
    }
}

impl Error for RenderError {}

pub fn format_currency(amount: f64) -> String {
    format!("Rs. {:.0}", amount)
}

pub fn fonts_available(override_dir: Option<&str>) -> bool {
    load_font_family(override_dir).is_ok()
}

fn load_font_family(override_dir: Option<&str>) -> Result<FontFamily<FontData>, RenderError> {
    let mut dirs: Vec<&str> = Vec::new();
    if let Some(dir) = override_dir {
        dirs.push(dir);
    }
    dirs.extend_from_slice(FONT_DIRS);

    for dir in &dirs {
        if let Ok(family) = genpdf::fonts::from_files(dir, FONT_NAME, None) {
            return Ok(family);
        }
    }

    Err(RenderError::FontUnavailable(format!(
        "no {} font found under {:?}; set PDF_FONT_DIR",
        FONT_NAME, dirs
    )))
}

/// Render the plan as a PDF and return the raw bytes. The layout is fixed:
/// title header, trip overview table, one section per day, trailing cost
/// breakdown table.
pub fn render_document(
    plan: &ItineraryPlan,
    font_dir: Option<&str>,
) -> Result<Vec<u8>, RenderError> {
    if plan.days.is_empty() {
        return Err(RenderError::EmptyPlan);
    }

    let font_family = load_font_family(font_dir)?;
    let mut doc = Document::new(font_family);
    doc.set_title(format!(
        "Travel Itinerary - {}",
        plan.metadata.destination_city
    ));

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    push_header(&mut doc, plan);
    push_overview(&mut doc, plan)?;
    push_summary(&mut doc, plan);
    push_days(&mut doc, plan);
    push_cost_breakdown(&mut doc, plan)?;
    push_footer(&mut doc, plan);

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|err| RenderError::Pdf(format!("failed to render document: {}", err)))?;
    Ok(buffer)
}

fn push_header(doc: &mut Document, plan: &ItineraryPlan) {
    let title_style = Style::new().bold().with_font_size(22);
    doc.push(Paragraph::new(StyledString::new(
        "TRAVEL ITINERARY".to_string(),
        title_style,
    )));

    let subtitle_style = Style::new().with_font_size(13);
    doc.push(Paragraph::new(StyledString::new(
        format!(
            "{} - {} Days Adventure",
            plan.metadata.destination_city.to_uppercase(),
            plan.metadata.num_days
        ),
        subtitle_style,
    )));
    doc.push(Break::new(1));
}

fn two_column_table() -> TableLayout {
    let mut table = TableLayout::new(vec![1, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    table
}

fn push_row(table: &mut TableLayout, label: &str, value: String) -> Result<(), RenderError> {
    table
        .row()
        .element(Paragraph::new(StyledString::new(
            label.to_string(),
            Style::new().bold(),
        )))
        .element(Paragraph::new(value))
        .push()
        .map_err(|err| RenderError::Pdf(format!("failed to add table row: {}", err)))
}

fn push_overview(doc: &mut Document, plan: &ItineraryPlan) -> Result<(), RenderError> {
    let meta = &plan.metadata;
    let costs = &plan.cost_breakdown;

    doc.push(Paragraph::new(StyledString::new(
        "Trip Overview".to_string(),
        Style::new().bold().with_font_size(15),
    )));
    doc.push(Break::new(0.5));

    let mut table = two_column_table();
    push_row(&mut table, "Destination", meta.destination_city.clone())?;
    if let Some(origin) = &meta.origin_city {
        push_row(&mut table, "Origin", origin.clone())?;
    }
    push_row(&mut table, "Duration", format!("{} Days", meta.num_days))?;
    push_row(
        &mut table,
        "Travelers",
        format!("{} Adults, {} Children", meta.adults, meta.children),
    )?;
    push_row(&mut table, "Budget", format_currency(meta.budget))?;
    if costs.travel_cost > 0.0 {
        push_row(&mut table, "Travel Cost", format_currency(costs.travel_cost))?;
    }
    if costs.hotel_cost > 0.0 {
        push_row(&mut table, "Hotel Cost", format_currency(costs.hotel_cost))?;
    }
    push_row(
        &mut table,
        "Activities Budget",
        format_currency(costs.activities_budget),
    )?;
    push_row(&mut table, "Grand Total", format_currency(costs.total))?;
    push_row(&mut table, "Remaining", format_currency(meta.remaining))?;
    push_row(
        &mut table,
        "Budget Utilization",
        format!("{}%", meta.utilization),
    )?;
    push_row(&mut table, "Preferences", meta.preferences.join(", "))?;
    doc.push(table);
    doc.push(Break::new(1));
    Ok(())
}

fn push_summary(doc: &mut Document, plan: &ItineraryPlan) {
    if plan.metadata.summary.is_empty() {
        return;
    }
    doc.push(Paragraph::new(StyledString::new(
        "Trip Summary".to_string(),
        Style::new().bold().with_font_size(15),
    )));
    doc.push(Break::new(0.5));
    doc.push(Paragraph::new(StyledString::new(
        plan.metadata.summary.clone(),
        Style::new().italic(),
    )));
    doc.push(Break::new(1));
}

fn push_days(doc: &mut Document, plan: &ItineraryPlan) {
    doc.push(Paragraph::new(StyledString::new(
        "Daily Itinerary".to_string(),
        Style::new().bold().with_font_size(15),
    )));
    doc.push(Break::new(0.5));

    for day in &plan.days {
        doc.push(Paragraph::new(StyledString::new(
            format!("Day {}", day.day_number),
            Style::new().bold().with_font_size(13),
        )));
        doc.push(Break::new(0.3));

        for activity in &day.activities {
            doc.push(Paragraph::new(StyledString::new(
                format!(
                    "{} - {} ({:.1}h)",
                    activity.time_slot.label(),
                    activity.name,
                    activity.duration_hours
                ),
                Style::new().bold(),
            )));
            if !activity.description.is_empty() {
                doc.push(Paragraph::new(activity.description.clone()));
            }
            doc.push(Break::new(0.3));
        }
        doc.push(Break::new(0.7));
    }
}

fn push_cost_breakdown(doc: &mut Document, plan: &ItineraryPlan) -> Result<(), RenderError> {
    let costs = &plan.cost_breakdown;
    let meta = &plan.metadata;

    doc.push(Paragraph::new(StyledString::new(
        "Cost Breakdown".to_string(),
        Style::new().bold().with_font_size(15),
    )));
    doc.push(Break::new(0.5));

    let mut table = two_column_table();
    if costs.travel_cost > 0.0 {
        push_row(&mut table, "Travel", format_currency(costs.travel_cost))?;
    }
    if costs.hotel_cost > 0.0 {
        push_row(&mut table, "Hotel", format_currency(costs.hotel_cost))?;
    }
    push_row(
        &mut table,
        "Activities",
        format_currency(costs.activities_budget),
    )?;
    push_row(&mut table, "GRAND TOTAL", format_currency(costs.total))?;
    push_row(&mut table, "BUDGET", format_currency(meta.budget))?;
    push_row(&mut table, "REMAINING", format_currency(meta.remaining))?;
    doc.push(table);
    Ok(())
}

fn push_footer(doc: &mut Document, plan: &ItineraryPlan) {
    doc.push(Break::new(1.5));
    doc.push(Paragraph::new(StyledString::new(
        format!(
            "Generated by AI Travel Planner | {}",
            plan.metadata.generated_at.format("%B %d, %Y")
        ),
        Style::new().with_font_size(9),
    )));
}
