use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Campaign, CampaignId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignBody {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateCampaignBody {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

pub type CampaignBody = Campaign;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignListBody {
    pub campaigns: Vec<CampaignBody>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignItemBody {
    pub campaign: CampaignBody,
}

impl CampaignItemBody {
    fn render(campaign: Campaign) -> CampaignItemBody {
        CampaignItemBody { campaign }
    }
}

#[post("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    body: Json<CreateCampaignBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();

    let campaign = manager::create_campaign(&***db, body.name, body.due_date).await?;

    Ok(HttpResponse::Created().json(CampaignItemBody::render(campaign)))
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<Box<dyn Database>>,
) -> Result<Json<CampaignListBody>, Error> {
    let campaigns = manager::get_campaigns(&***db).await?;

    Ok(Json(CampaignListBody { campaigns }))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignItemBody>, Error> {
    let campaign_id = params.into_inner();

    let campaign = manager::get_campaign_by_id(&***db, campaign_id).await?;

    Ok(Json(CampaignItemBody::render(campaign)))
}

#[put("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
    body: Json<UpdateCampaignBody>,
) -> Result<Json<CampaignItemBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    let campaign =
        manager::update_campaign(&***db, campaign_id, body.name, body.due_date).await?;

    Ok(Json(CampaignItemBody::render(campaign)))
}

#[delete("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();

    manager::delete_campaign(&***db, campaign_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
