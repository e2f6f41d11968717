use tracing::{debug, info};

use super::dto::{MonthlyReport, ReportQuery};
use super::repo_types::{CalorieEntry, CategoryGroup, MonthFilter, ReportItem};
use crate::error::StoreError;
use crate::store::CalorieStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Other,
}

impl Category {
    /// Absent or unrecognized labels fall into `Other`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("breakfast") => Category::Breakfast,
            Some("lunch") => Category::Lunch,
            Some("dinner") => Category::Dinner,
            _ => Category::Other,
        }
    }
}

impl MonthlyReport {
    fn bucket_mut(&mut self, category: Category) -> &mut Vec<ReportItem> {
        match category {
            Category::Breakfast => &mut self.breakfast,
            Category::Lunch => &mut self.lunch,
            Category::Dinner => &mut self.dinner,
            Category::Other => &mut self.other,
        }
    }
}

/// Folds grouped rows into the four fixed buckets. Several groups landing in
/// the same bucket are appended in the order they arrive.
pub fn build_report(groups: Vec<CategoryGroup>) -> MonthlyReport {
    let mut report = MonthlyReport::default();
    for group in groups {
        let category = Category::from_label(group.category.as_deref());
        report.bucket_mut(category).extend(group.items);
    }
    report
}

/// Reads the leading integer of `s` the way a browser's `parseInt` does:
/// leading whitespace, an optional sign, then decimal digits (or hex after
/// `0x`). Trailing text is ignored, so `"3abc"` and `"3.5"` both give 3.
/// `None` when no digit follows or the value does not fit `T`.
pub fn parse_leading_int<T: TryFrom<i64>>(s: &str) -> Option<T> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    let magnitude = i64::from_str_radix(&rest[..end], radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).ok()
}

/// `None` when any field is missing or has no leading integer; such a query matches nothing.
pub fn parse_filter(q: &ReportQuery) -> Option<MonthFilter> {
    fn int<T: TryFrom<i64>>(v: &Option<String>) -> Option<T> {
        parse_leading_int(v.as_deref()?)
    }
    Some(MonthFilter {
        user_id: int(&q.user_id)?,
        year: int(&q.year)?,
        month: int(&q.month)?,
    })
}

pub async fn record_entry(store: &dyn CalorieStore, entry: CalorieEntry) -> Result<(), StoreError> {
    store.insert_entry(&entry).await?;
    info!(
        user_id = entry.user_id,
        year = entry.year,
        month = entry.month,
        day = entry.day,
        category = ?entry.category,
        "calorie entry recorded"
    );
    Ok(())
}

pub async fn generate_monthly_report(
    store: &dyn CalorieStore,
    q: &ReportQuery,
) -> Result<MonthlyReport, StoreError> {
    let Some(filter) = parse_filter(q) else {
        debug!(?q, "unparsable report query, nothing can match");
        return Ok(MonthlyReport::default());
    };
    let groups = store.group_by_category(filter).await?;
    let report = build_report(groups);
    debug!(?filter, ?report, "monthly report");
    Ok(report)
}
