pub mod dto;
pub mod html;

use tracing::{debug, info, warn};

use crate::classify;
use crate::dates;
use crate::error::AppError;
use crate::models::{Deadline, WorkloadProfile};

use dto::{CourseHeader, ParseIssue, ParsedReport, RawDeadlineRecord};
use html::{Document, ElementRef};

const CATEGORY_ROW: &[&str] = &["report-row", "category-row", "has-children"];

/// Parses one saved gradebook report page.
///
/// Rows that lack a title are skipped and recorded as issues; a page whose
/// title does not carry a course header yields no records at all. Only a
/// document that cannot be read as HTML is an error.
pub fn parse_report(source_name: &str, raw_html: &str) -> Result<ParsedReport, AppError> {
    let doc = Document::parse(raw_html).map_err(|e| AppError::MalformedDocument {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;

    let page_title = doc.title();
    let Some(header) = page_title.as_deref().and_then(parse_header) else {
        warn!("{}: no course header in page title {:?}", source_name, page_title);
        return Ok(ParsedReport {
            header: None,
            records: Vec::new(),
            issues: vec![ParseIssue::MissingCourseHeader { page_title }],
        });
    };
    info!(
        "{}: parsed course {} / {} / {} / {}",
        source_name, header.title, header.instructor, header.period, header.term
    );

    let mut report = ParsedReport {
        header: Some(header),
        ..Default::default()
    };

    for category_row in doc.root().select_all("tr", CATEGORY_ROW) {
        let section = category_row.text();
        debug!("{}: category {:?}", source_name, section);

        let mut row_index = 0;
        let mut next = category_row.next_element_sibling();
        while let Some(row) = next {
            if row.has_class("category-row") {
                break;
            }
            if row.has_class("item-row") {
                match parse_item_row(row, &section) {
                    Some(record) => {
                        if record.due_date == dates::INVALID_DATE {
                            warn!("{}: unparsable due date {:?} for {}", source_name, record.due_date_raw, record.title);
                            report.issues.push(ParseIssue::UnparsableDueDate {
                                title: record.title.clone(),
                                raw: record.due_date_raw.clone(),
                            });
                        }
                        report.records.push(record);
                    }
                    None => {
                        debug!("{}: skipping row {} under {:?} (no title)", source_name, row_index, section);
                        report.issues.push(ParseIssue::PartialRowSkipped {
                            section: section.clone(),
                            row: row_index,
                        });
                    }
                }
                row_index += 1;
            }
            next = row.next_element_sibling();
        }
    }

    info!(
        "{}: {} deadlines, {} rows skipped",
        source_name,
        report.records.len(),
        report.skipped_rows()
    );
    Ok(report)
}

/// `"<Title>: <Instructor> <Period> <Term> | ..."`
pub fn parse_header(page_title: &str) -> Option<CourseHeader> {
    let (title, rest) = page_title.split_once(": ")?;
    let info: Vec<&str> = rest.split_whitespace().collect();
    if info.len() < 3 {
        return None;
    }
    let term = info[2].split('|').next().unwrap_or("").trim();
    Some(CourseHeader {
        title: title.trim().to_string(),
        instructor: info[0].to_string(),
        period: info[1].to_string(),
        term: term.to_string(),
    })
}

fn parse_item_row(row: ElementRef<'_>, section: &str) -> Option<RawDeadlineRecord> {
    let title_el = row.select_first("span", &["title"])?;

    // The site appends the item type as the last word of the title.
    let title_text = title_el.text();
    let mut words: Vec<&str> = title_text.split(' ').collect();
    words.pop();
    let title = words.join(" ");

    let link = title_el
        .select_first("a", &[])
        .map(|a| a.text())
        .unwrap_or_default();

    let due_text = span_text(row, "due-date");
    let due_date_raw = due_text.strip_prefix("Due ").unwrap_or(&due_text).trim().to_string();

    let rounded_grade_raw = row
        .select_first("span", &["rounded-grade"])
        .and_then(|e| e.select_first("span", &["awarded-grade"]))
        .map(|e| e.text())
        .unwrap_or_default()
        .replace('%', "")
        .trim()
        .to_string();
    let max_grade_raw = span_text(row, "max-grade").replace('/', "").trim().to_string();

    let phrase = classify::phrase_token(&link).to_string();
    let category = classify::classify(&phrase);
    if category.is_none() {
        debug!("no category for {:?}, using homework hours", phrase);
    }

    Some(RawDeadlineRecord {
        due_date: dates::normalize(&due_date_raw),
        rounded_grade: parse_grade(&rounded_grade_raw),
        max_grade: parse_grade(&max_grade_raw),
        title,
        link,
        due_date_raw,
        rounded_grade_raw,
        max_grade_raw,
        phrase,
        category,
        section: section.to_string(),
    })
}

/// `0.0` unless the text is a finite number. The store cannot hold NaN or
/// infinity.
fn parse_grade(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|g| g.is_finite())
        .unwrap_or(0.0)
}

fn span_text(row: ElementRef<'_>, class: &str) -> String {
    row.select_first("span", &[class])
        .map(|e| e.text())
        .unwrap_or_default()
}

impl RawDeadlineRecord {
    /// Expected hours come from `profile`; actual hours start at zero.
    pub fn to_deadline(&self, profile: &WorkloadProfile) -> Deadline {
        let hours = profile.hours_for(self.category);
        Deadline {
            link: self.link.clone(),
            due_date: self.due_date.clone(),
            max_grade: self.max_grade,
            title: self.title.clone(),
            rounded_grade: self.rounded_grade,
            category: self.category,
            expected_total_hrs: hours.total,
            expected_hrs_per_day: hours.per_day,
            actual_total_hrs: 0,
            actual_hrs_per_day: 0,
            is_completed: false,
        }
    }
}
