#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use deadline_tracker::dates;
use deadline_tracker::models::{Category, Deadline};

pub const PAGE_TITLE: &str = "Algebra II: Smith 3 S2 | Schoology";

pub struct Item<'a> {
    pub link: &'a str,
    pub kind: &'a str,
    pub due: &'a str,
    pub grade: &'a str,
    pub max: &'a str,
}

pub fn item<'a>(link: &'a str, kind: &'a str, due: &'a str) -> Item<'a> {
    Item {
        link,
        kind,
        due,
        grade: "",
        max: "",
    }
}

pub fn item_row(item: &Item<'_>) -> String {
    format!(
        r#"<tr class="report-row item-row">
  <td class="title-column">
    <span class="title"><a href="/assignment/1">{link}</a> <span class="item-type">{kind}</span></span>
    <span class="due-date">Due {due}</span>
  </td>
  <td class="grade-column">
    <span class="rounded-grade"><span class="awarded-grade">{grade}</span></span>
    <span class="max-grade">/ {max}</span>
  </td>
</tr>
"#,
        link = item.link,
        kind = item.kind,
        due = item.due,
        grade = item.grade,
        max = item.max,
    )
}

pub fn category_row(label: &str) -> String {
    format!(
        "<tr class=\"report-row category-row has-children\"><td><span class=\"title\">{label}</span></td></tr>\n"
    )
}

pub fn page_with_rows(title: &str, rows: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><title>{title}</title></head>\n<body><table class=\"gradebook\"><tbody>\n{rows}</tbody></table></body></html>"
    )
}

pub fn page(title: &str, sections: &[(&str, Vec<Item<'_>>)]) -> String {
    let mut rows = String::new();
    for (label, items) in sections {
        rows.push_str(&category_row(label));
        for item in items {
            rows.push_str(&item_row(item));
        }
    }
    page_with_rows(title, &rows)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn deadline(title: &str, due: NaiveDateTime, category: Category, total: i32, per_day: i32) -> Deadline {
    Deadline {
        link: title.to_string(),
        due_date: dates::format_canonical(&due),
        max_grade: 0.0,
        title: title.to_string(),
        rounded_grade: 0.0,
        category: Some(category),
        expected_total_hrs: total,
        expected_hrs_per_day: per_day,
        actual_total_hrs: 0,
        actual_hrs_per_day: 0,
        is_completed: false,
    }
}
