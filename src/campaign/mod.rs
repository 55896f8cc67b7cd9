use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = i64;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Campaign {
    pub campaign_id: CampaignId,
    pub name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
