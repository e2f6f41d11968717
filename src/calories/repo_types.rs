use serde::{Deserialize, Serialize};

/// Calorie value kept in the numeric type it arrived with, so `200` is stored
/// as a BSON integer and reported back as `200`, not `200.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Int(i64),
    Float(f64),
}

impl Amount {
    pub fn as_f64(self) -> f64 {
        match self {
            Amount::Int(v) => v as f64,
            Amount::Float(v) => v,
        }
    }
}

/// Document stored in the `calories` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieEntry {
    pub user_id: i64,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: Amount,
}

/// One line of a monthly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub day: i32,
    pub description: String,
    pub amount: Amount,
}

impl From<&CalorieEntry> for ReportItem {
    fn from(e: &CalorieEntry) -> Self {
        Self {
            day: e.day,
            description: e.description.clone(),
            amount: e.amount,
        }
    }
}

/// Output row of the `$group` stage: entries sharing one raw category label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryGroup {
    #[serde(rename = "_id", default)]
    pub category: Option<String>,
    pub items: Vec<ReportItem>,
}

/// Selects the entries of one user for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    pub user_id: i64,
    pub year: i32,
    pub month: i32,
}
