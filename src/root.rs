use actix_web::get;
use actix_web::web::Json;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[get("/")]
#[tracing::instrument]
pub async fn get_root() -> Json<MessageBody> {
    Json(MessageBody {
        message: "Ad Copy API!".to_string(),
    })
}
