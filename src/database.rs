use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::campaign::db::{self as campaign_db, CampaignStore, MemoryCampaignStore};
use crate::config::Storage;
use crate::error::Error;

pub type SqliteCampaignStore = SqlitePool;

pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
}

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    campaigns: MemoryCampaignStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

impl Database for MemoryDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    campaigns: SqliteCampaignStore,
}

impl SqliteDatabase {
    pub async fn initialize(pool: SqlitePool) -> Result<SqliteDatabase, Error> {
        campaign_db::initialize(&pool).await?;

        Ok(SqliteDatabase { campaigns: pool })
    }

    pub async fn open(path: &str) -> Result<SqliteDatabase, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        SqliteDatabase::initialize(pool).await
    }
}

impl Database for SqliteDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}

pub async fn connect(storage: &Storage) -> Result<Box<dyn Database>, Error> {
    match storage {
        Storage::Memory => {
            info!("using in-memory storage");
            Ok(Box::new(MemoryDatabase::new()))
        }
        Storage::Sqlite { path } => {
            info!("opening sqlite database: {}", path);
            Ok(Box::new(SqliteDatabase::open(path).await?))
        }
    }
}
