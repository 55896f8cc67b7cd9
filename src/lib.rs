use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web::{self, Data, JsonConfig, PathConfig, ServiceConfig};
use actix_web::{App, HttpResponse, HttpServer, ResponseError};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod root;
pub mod seed;

pub use campaign::{
    CampaignBody, CampaignItemBody, CampaignListBody, CreateCampaignBody, UpdateCampaignBody,
};
pub use root::MessageBody;

use crate::config::Config;
use crate::database::Database;
use crate::error::Error;

pub const API_PREFIX: &str = "/api/v1";

/// Registers the api routes, the shared database, and the extractor error
/// handlers on an `App`.
pub fn configure(db: Data<Box<dyn Database>>) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(db)
            .app_data(JsonConfig::default().error_handler(|err, _req| {
                // format json errors with custom format
                Error::InvalidJson(err).into()
            }))
            .app_data(PathConfig::default().error_handler(|err, _req| {
                // format path errors with custom format
                Error::InvalidPath(err).into()
            }))
            .service(
                web::scope(API_PREFIX)
                    .service(root::get_root)
                    .service(campaign::endpoints::create_campaign)
                    .service(campaign::endpoints::get_campaigns)
                    .service(campaign::endpoints::get_campaign_by_id)
                    .service(campaign::endpoints::update_campaign)
                    .service(campaign::endpoints::delete_campaign)
                    // only reached when no method guard above matched
                    .service(web::resource("/").to(method_not_allowed))
                    .service(web::resource("/campaigns").to(method_not_allowed))
                    .service(web::resource("/campaigns/{campaign_id}").to(method_not_allowed)),
            )
            .default_service(web::to(path_not_found));
    }
}

async fn path_not_found() -> HttpResponse {
    Error::PathNotFound.error_response()
}

async fn method_not_allowed() -> HttpResponse {
    Error::MethodNotAllowed.error_response()
}

pub fn serve(listener: TcpListener, db: Box<dyn Database>) -> Result<Server, Error> {
    let db = Data::new(db);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure(db.clone()))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub async fn run(config: Config) -> Result<(), Error> {
    let db = database::connect(&config.storage).await?;

    seed::seed(&*db).await?;

    info!("listening on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address)?;
    serve(listener, db)?.await?;

    Ok(())
}
