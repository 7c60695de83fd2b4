//! Catalog sync pipeline: remote catalog to product table.

use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, instrument, warn};

use aetheris_common::ProductRecord;
use catalog::ProductStore;
use provider::stac::{CollectionDetail, StacClient};

use crate::config::SyncConfig;

/// Fetches every collection's detail from the remote catalog and replaces
/// the product table with the result.
pub struct SyncPipeline {
    config: SyncConfig,
    store: ProductStore,
    stac: StacClient,
}

impl SyncPipeline {
    pub async fn new(config: SyncConfig) -> Result<Self> {
        let store = ProductStore::connect(&config.database_url).await?;
        store.migrate().await?;

        let stac = StacClient::new(config.catalog_url.clone())?;

        Ok(Self {
            config,
            store,
            stac,
        })
    }

    /// One full sync cycle. A collection whose detail fetch fails is
    /// logged and skipped; the run still replaces the table with the rest.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> Result<usize> {
        let ids = self.stac.list_collections().await?;
        info!(count = ids.len(), "collections listed from remote catalog");

        let mut products = Vec::new();
        for id in &ids {
            match self.stac.collection_detail(id).await {
                Ok(detail) => products.push(record_from_detail(&detail, &self.config)),
                Err(e) => {
                    warn!(collection = %id, error = %e, "detail fetch failed, skipping");
                }
            }
        }

        let count = self.store.replace_all(&products).await?;
        info!(count, "sync cycle complete");
        Ok(count)
    }

    /// Continuous mode: run a cycle, sleep, repeat. A failed cycle is
    /// logged and the next one still runs.
    pub async fn run_forever(&self) -> Result<()> {
        let interval = Duration::from_secs(self.config.poll_interval_secs);
        loop {
            if let Err(e) = self.run_once().await {
                error!(error = %e, "sync cycle failed");
            }
            tokio::time::sleep(interval).await;
        }
    }
}

/// Build the cached product record for one remote collection.
fn record_from_detail(detail: &CollectionDetail, config: &SyncConfig) -> ProductRecord {
    ProductRecord {
        product_name: detail.id.clone(),
        friendly_name: detail.title_or_id().to_string(),
        description: detail.description.clone(),
        variables: detail.variables(),
        platform_id: config.infer_platform_id(&detail.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::default_platform_mapping;

    fn config() -> SyncConfig {
        SyncConfig {
            database_url: "postgresql://localhost/test".to_string(),
            catalog_url: "http://localhost/stac".to_string(),
            poll_interval_secs: 3600,
            platform_mapping: default_platform_mapping(),
        }
    }

    #[test]
    fn test_record_from_detail() {
        let detail: CollectionDetail = serde_json::from_value(serde_json::json!({
            "id": "S2-16D-2",
            "title": "Sentinel-2 Data Cube",
            "description": "16-day composites",
            "properties": {
                "eo:bands": [{"name": "B01"}, {"name": "NDVI"}]
            }
        }))
        .unwrap();

        let record = record_from_detail(&detail, &config());
        assert_eq!(record.product_name, "S2-16D-2");
        assert_eq!(record.friendly_name, "Sentinel-2 Data Cube");
        assert_eq!(record.declared_bands(), vec!["B01", "NDVI"]);
        assert_eq!(record.platform_id.as_deref(), Some("sentinel2"));
    }

    #[test]
    fn test_record_without_title_or_platform() {
        let detail: CollectionDetail = serde_json::from_value(serde_json::json!({
            "id": "prec_merge_daily-1"
        }))
        .unwrap();

        let record = record_from_detail(&detail, &config());
        assert_eq!(record.friendly_name, "prec_merge_daily-1");
        assert!(record.platform_id.is_none());
        assert!(record.declared_bands().is_empty());
    }
}
