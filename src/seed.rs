use chrono::Utc;
use tracing::info;

use crate::database::Database;
use crate::error::Error;

const SEED_CAMPAIGNS: &[&str] = &["Summer Launch", "Black Friday"];

/// Populates an empty store with the starter campaigns. A store that already
/// holds campaigns is left alone.
pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    if !db.campaigns().fetch_campaigns().await?.is_empty() {
        info!("store already populated, skipping seed");
        return Ok(());
    }

    let now = Utc::now();
    for name in SEED_CAMPAIGNS {
        db.campaigns()
            .insert_campaign(name.to_string(), Some(now))
            .await?;
    }

    info!("seeded {} campaigns", SEED_CAMPAIGNS.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDatabase;

    #[tokio::test]
    async fn seeds_two_campaigns_once() {
        let db = MemoryDatabase::new();

        seed(&db).await.unwrap();
        seed(&db).await.unwrap();

        let campaigns = db.campaigns().fetch_campaigns().await.unwrap();
        let names: Vec<_> = campaigns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Summer Launch", "Black Friday"]);
        assert!(campaigns.iter().all(|c| c.due_date.is_some()));
    }
}
