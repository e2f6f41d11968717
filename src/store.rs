use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, Document};
use tracing::debug;

use crate::calories::repo_types::{CalorieEntry, CategoryGroup, MonthFilter};
use crate::db::ConnectionManager;
use crate::error::StoreError;

pub const CALORIES_COLLECTION: &str = "calories";

#[async_trait]
pub trait CalorieStore: Send + Sync {
    /// Makes sure the backing store is reachable before a request uses it.
    async fn ensure_connected(&self) -> Result<(), StoreError>;
    async fn insert_entry(&self, entry: &CalorieEntry) -> Result<(), StoreError>;
    /// Entries matching `filter`, grouped by their raw `category` label in store order.
    async fn group_by_category(&self, filter: MonthFilter)
        -> Result<Vec<CategoryGroup>, StoreError>;
    async fn shutdown(&self);
}

pub struct MongoCalorieStore {
    conn: ConnectionManager,
}

impl MongoCalorieStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

fn month_pipeline(filter: MonthFilter) -> Vec<Document> {
    vec![
        doc! {
            "$match": {
                "user_id": filter.user_id,
                "year": filter.year,
                "month": filter.month,
            }
        },
        doc! {
            "$group": {
                "_id": "$category",
                "items": {
                    "$push": {
                        "day": "$day",
                        "description": "$description",
                        "amount": "$amount",
                    }
                },
            }
        },
    ]
}

#[async_trait]
impl CalorieStore for MongoCalorieStore {
    async fn ensure_connected(&self) -> Result<(), StoreError> {
        self.conn.ensure_connected().await.map(|_| ())
    }

    async fn insert_entry(&self, entry: &CalorieEntry) -> Result<(), StoreError> {
        let db = self.conn.database().await?;
        let res = db
            .collection::<CalorieEntry>(CALORIES_COLLECTION)
            .insert_one(entry)
            .await?;
        debug!(id = %res.inserted_id, "calorie entry inserted");
        Ok(())
    }

    async fn group_by_category(
        &self,
        filter: MonthFilter,
    ) -> Result<Vec<CategoryGroup>, StoreError> {
        let db = self.conn.database().await?;
        let docs: Vec<Document> = db
            .collection::<Document>(CALORIES_COLLECTION)
            .aggregate(month_pipeline(filter))
            .await?
            .try_collect()
            .await?;

        docs.into_iter()
            .map(|d| from_document::<CategoryGroup>(d).map_err(StoreError::from))
            .collect()
    }

    async fn shutdown(&self) {
        self.conn.shutdown().await;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::calories::repo_types::Amount;

    #[test]
    fn pipeline_matches_then_groups_by_category() {
        let p = month_pipeline(MonthFilter {
            user_id: 7,
            year: 2024,
            month: 3,
        });
        assert_eq!(p.len(), 2);

        let m = p[0].get_document("$match").unwrap();
        assert_eq!(m.get_i64("user_id").unwrap(), 7);
        assert_eq!(m.get_i32("year").unwrap(), 2024);
        assert_eq!(m.get_i32("month").unwrap(), 3);

        let g = p[1].get_document("$group").unwrap();
        assert_eq!(g.get_str("_id").unwrap(), "$category");
        let push = g.get_document("items").unwrap().get_document("$push").unwrap();
        assert_eq!(push.keys().collect::<Vec<_>>(), ["day", "description", "amount"]);
    }

    #[test]
    fn group_row_with_null_id_decodes_as_no_category() {
        let d = doc! {
            "_id": null,
            "items": [{ "day": 2, "description": "apple", "amount": 95 }],
        };
        let g: CategoryGroup = from_document(d).unwrap();
        assert_eq!(g.category, None);
        assert_eq!(g.items[0].amount, Amount::Int(95));
    }

    #[test]
    fn group_row_missing_fields_is_a_decode_error() {
        let d = doc! { "_id": "lunch", "items": [{ "day": 2 }] };
        let err = from_document::<CategoryGroup>(d).map_err(StoreError::from).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
