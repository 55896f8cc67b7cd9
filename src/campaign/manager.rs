use chrono::{DateTime, Utc};

use crate::database::Database;
use crate::error::Error;

use super::{Campaign, CampaignId};

fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::InvalidCampaignName {
            name: name.to_string(),
        });
    }

    Ok(())
}

#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: &dyn Database,
    name: String,
    due_date: Option<DateTime<Utc>>,
) -> Result<Campaign, Error> {
    validate_name(&name)?;

    let campaign = db.campaigns().insert_campaign(name, due_date).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    Ok(campaign)
}

/// The name is always replaced, even by an empty one; the due date only
/// when one is given.
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: &dyn Database,
    campaign_id: CampaignId,
    name: String,
    due_date: Option<DateTime<Utc>>,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .update_campaign(campaign_id, name, due_date)
        .await?
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn delete_campaign(db: &dyn Database, campaign_id: CampaignId) -> Result<(), Error> {
    if !db.campaigns().delete_campaign(campaign_id).await? {
        return Err(Error::CampaignNotFound { campaign_id });
    }

    Ok(())
}
