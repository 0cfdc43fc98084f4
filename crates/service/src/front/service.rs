use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use models::{category, workshop};

use crate::catalog::repository::WorkshopRepository;
use crate::errors::ServiceError;
use crate::reference::repository::CategoryRepository;

#[derive(Debug, Clone, Serialize)]
pub struct FrontPageData {
    #[serde(rename = "newWorkshops")]
    pub new_workshops: Vec<workshop::Model>,
    pub categories: Vec<category::Model>,
}

pub struct FrontService {
    workshops: Arc<dyn WorkshopRepository>,
    categories: Arc<dyn CategoryRepository>,
    new_workshops_limit: u64,
}

impl FrontService {
    pub fn new(workshops: Arc<dyn WorkshopRepository>, categories: Arc<dyn CategoryRepository>, new_workshops_limit: u64) -> Self {
        Self { workshops, categories, new_workshops_limit }
    }

    /// Newest live workshops and every category; either read failing fails the call.
    #[instrument(skip(self))]
    pub async fn get_front_page_data(&self) -> Result<FrontPageData, ServiceError> {
        let new_workshops = self.workshops.list_new_workshops(self.new_workshops_limit).await?;
        let categories = self.categories.list_categories().await?;
        Ok(FrontPageData { new_workshops, categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{fixtures, InMemoryStore};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn returns_exactly_stored_workshops_and_categories() {
        let store = Arc::new(InMemoryStore::default());
        let a = fixtures::workshop(&store, "A", dec!(10)).await;
        let b = fixtures::workshop(&store, "B", dec!(20)).await;
        let c = fixtures::workshop(&store, "C", dec!(30)).await;
        fixtures::category(&store, "Cooking").await;

        let svc = FrontService::new(store.clone(), store.clone(), 6);
        let data = svc.get_front_page_data().await.unwrap();
        let ids: Vec<_> = data.new_workshops.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
        assert_eq!(data.categories.len(), 2);

        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("newWorkshops").is_some());
    }

    #[tokio::test]
    async fn caps_and_skips_trashed() {
        let store = Arc::new(InMemoryStore::default());
        let mut ids = Vec::new();
        for i in 0..4 {
            ids.push(fixtures::workshop(&store, &format!("W{i}"), dec!(1)).await.id);
        }
        store.soft_delete_workshops(&[ids[3]]).await.unwrap();
        let data = FrontService::new(store.clone(), store.clone(), 2).get_front_page_data().await.unwrap();
        let got: Vec<_> = data.new_workshops.iter().map(|w| w.id).collect();
        assert_eq!(got, vec![ids[2], ids[1]]);
    }

    #[tokio::test]
    async fn read_failure_propagates() {
        let store = Arc::new(InMemoryStore::default());
        store.fail_reads(true);
        let svc = FrontService::new(store.clone(), store.clone(), 6);
        assert!(matches!(svc.get_front_page_data().await, Err(ServiceError::Db(_))));
    }
}
