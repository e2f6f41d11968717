use serde::{Deserialize, Serialize};

use super::repo_types::{Amount, CalorieEntry, ReportItem};
use crate::error::ApiError;

/// Request body for `POST /addcalories`.
#[derive(Debug, Deserialize)]
pub struct NewCalorieEntry {
    pub user_id: i64,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: Amount,
}

impl NewCalorieEntry {
    pub fn validate(self) -> Result<CalorieEntry, ApiError> {
        if !(1..=12).contains(&self.month) {
            return Err(ApiError::Validation(format!(
                "month must be between 1 and 12, got {}",
                self.month
            )));
        }
        if !(1..=31).contains(&self.day) {
            return Err(ApiError::Validation(format!(
                "day must be between 1 and 31, got {}",
                self.day
            )));
        }
        let amount = self.amount.as_f64();
        if !amount.is_finite() || amount < 0.0 {
            return Err(ApiError::Validation(
                "amount must be a non-negative number".into(),
            ));
        }
        Ok(CalorieEntry {
            user_id: self.user_id,
            year: self.year,
            month: self.month,
            day: self.day,
            description: self.description,
            category: self.category,
            amount: self.amount,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query of `GET /report`. Kept as text; see [`super::services::parse_filter`].
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub user_id: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub breakfast: Vec<ReportItem>,
    pub lunch: Vec<ReportItem>,
    pub dinner: Vec<ReportItem>,
    pub other: Vec<ReportItem>,
}
