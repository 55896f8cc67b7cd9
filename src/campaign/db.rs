use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::database::SqliteCampaignStore;
use crate::error::Error;

use super::{Campaign, CampaignId};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS campaign (
        campaign_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        due_date TEXT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS ix_campaign_name ON campaign (name)",
    "CREATE INDEX IF NOT EXISTS ix_campaign_due_date ON campaign (due_date)",
    "CREATE INDEX IF NOT EXISTS ix_campaign_created_at ON campaign (created_at)",
];

pub async fn initialize(pool: &SqlitePool) -> Result<(), Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error>;

    async fn insert_campaign(
        &self,
        name: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Campaign, Error>;

    /// Replaces the name and, if one is given, the due date. Returns `None`
    /// when no campaign has the id.
    async fn update_campaign(
        &self,
        campaign_id: CampaignId,
        name: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Campaign>, Error>;

    /// Returns `false` when no campaign has the id.
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<bool, Error>;
}

#[async_trait]
impl CampaignStore for SqliteCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let campaigns: Vec<Campaign> = sqlx::query_as::<_, Campaign>(
            "SELECT campaign_id, name, due_date, created_at FROM campaign ORDER BY campaign_id",
        )
        .fetch(self)
        .try_collect()
        .await?;

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let campaign: Option<Campaign> = sqlx::query_as::<_, Campaign>(
            "SELECT campaign_id, name, due_date, created_at FROM campaign WHERE campaign_id = ?",
        )
        .bind(campaign_id)
        .fetch_optional(self)
        .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn insert_campaign(
        &self,
        name: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Campaign, Error> {
        let campaign: Campaign = sqlx::query_as::<_, Campaign>(
            "INSERT INTO campaign (name, due_date, created_at) VALUES (?, ?, ?)
            RETURNING campaign_id, name, due_date, created_at",
        )
        .bind(name)
        .bind(due_date)
        .bind(Utc::now())
        .fetch_one(self)
        .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(
        &self,
        campaign_id: CampaignId,
        name: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Campaign>, Error> {
        let campaign: Option<Campaign> = sqlx::query_as::<_, Campaign>(
            "UPDATE campaign SET name = ?, due_date = COALESCE(?, due_date)
            WHERE campaign_id = ?
            RETURNING campaign_id, name, due_date, created_at",
        )
        .bind(name)
        .bind(due_date)
        .bind(campaign_id)
        .fetch_optional(self)
        .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM campaign WHERE campaign_id = ?")
            .bind(campaign_id)
            .execute(self)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Keeps campaigns in insertion order. Ids come from a counter that only
/// moves forward, so a deleted id is never handed out again.
#[derive(Debug, Default)]
pub struct MemoryCampaignStore {
    state: RwLock<MemoryCampaigns>,
}

#[derive(Debug, Default)]
struct MemoryCampaigns {
    campaigns: Vec<Campaign>,
    last_campaign_id: CampaignId,
}

impl MemoryCampaignStore {
    pub fn new() -> MemoryCampaignStore {
        MemoryCampaignStore::default()
    }
}

#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let state = self.state.read().await;

        Ok(state.campaigns.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let state = self.state.read().await;
        let campaign = state
            .campaigns
            .iter()
            .find(|c| c.campaign_id == campaign_id)
            .cloned();

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn insert_campaign(
        &self,
        name: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Campaign, Error> {
        let mut state = self.state.write().await;
        state.last_campaign_id += 1;

        let campaign = Campaign {
            campaign_id: state.last_campaign_id,
            name,
            due_date,
            created_at: Utc::now(),
        };
        state.campaigns.push(campaign.clone());

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(
        &self,
        campaign_id: CampaignId,
        name: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Campaign>, Error> {
        let mut state = self.state.write().await;
        let campaign = match state
            .campaigns
            .iter_mut()
            .find(|c| c.campaign_id == campaign_id)
        {
            Some(campaign) => campaign,
            None => return Ok(None),
        };

        campaign.name = name;
        if due_date.is_some() {
            campaign.due_date = due_date;
        }

        Ok(Some(campaign.clone()))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<bool, Error> {
        let mut state = self.state.write().await;
        let before = state.campaigns.len();
        state.campaigns.retain(|c| c.campaign_id != campaign_id);

        Ok(state.campaigns.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn sqlite_store() -> SqliteCampaignStore {
        // a single connection, otherwise every pooled connection opens its own memory db
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize(&pool).await.unwrap();
        pool
    }

    async fn exercise_lifecycle(store: &dyn CampaignStore) {
        let due = Utc.with_ymd_and_hms(2030, 1, 15, 12, 0, 0).unwrap();
        let first = store
            .insert_campaign("Spring Sale".into(), Some(due))
            .await
            .unwrap();
        let second = store.insert_campaign("Winter Sale".into(), None).await.unwrap();
        assert_ne!(first.campaign_id, second.campaign_id);
        assert_eq!(second.due_date, None);

        let fetched = store
            .fetch_campaign_by_id(first.campaign_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, first);

        let updated = store
            .update_campaign(first.campaign_id, "Spring Sale II".into(), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Spring Sale II");
        assert_eq!(updated.due_date, Some(due));
        assert_eq!(updated.created_at, first.created_at);

        let listed = store.fetch_campaigns().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|c| c.campaign_id).collect();
        assert_eq!(ids, vec![first.campaign_id, second.campaign_id]);

        assert!(store.delete_campaign(first.campaign_id).await.unwrap());
        assert!(!store.delete_campaign(first.campaign_id).await.unwrap());
        assert_eq!(store.fetch_campaign_by_id(first.campaign_id).await.unwrap(), None);
        assert_eq!(
            store
                .update_campaign(first.campaign_id, "Gone".into(), None)
                .await
                .unwrap(),
            None
        );

        let third = store.insert_campaign("Autumn Sale".into(), None).await.unwrap();
        assert!(third.campaign_id > second.campaign_id);

        // removing the newest record must not free its id for the next insert
        assert!(store.delete_campaign(third.campaign_id).await.unwrap());
        let fourth = store.insert_campaign("Cyber Monday".into(), None).await.unwrap();
        assert!(fourth.campaign_id > third.campaign_id);
    }

    #[tokio::test]
    async fn memory_store_lifecycle() {
        exercise_lifecycle(&MemoryCampaignStore::new()).await;
    }

    #[tokio::test]
    async fn sqlite_store_lifecycle() {
        exercise_lifecycle(&sqlite_store().await).await;
    }

    #[tokio::test]
    async fn sqlite_initialize_is_idempotent() {
        let pool = sqlite_store().await;
        pool.insert_campaign("Kept".into(), None).await.unwrap();

        initialize(&pool).await.unwrap();

        assert_eq!(pool.fetch_campaigns().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn memory_store_replaces_due_date_when_given() {
        let store = MemoryCampaignStore::new();
        let campaign = store.insert_campaign("Launch".into(), None).await.unwrap();
        let due = Utc.with_ymd_and_hms(2031, 6, 1, 0, 0, 0).unwrap();

        let updated = store
            .update_campaign(campaign.campaign_id, "Launch".into(), Some(due))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.due_date, Some(due));
    }
}
