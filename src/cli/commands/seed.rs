use crate::catalog::{seed_catalog, SeedOutcome};
use crate::config::AppConfig;
use crate::database::{CourseStore, MongoCourseStore};

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let store = MongoCourseStore::connect(&config.database).await?;

    let outcome = seed_catalog(&store).await;
    store.close().await;

    match outcome {
        SeedOutcome::Seeded(count) => println!("Seeded {} sample courses", count),
        SeedOutcome::AlreadyPopulated(count) => {
            println!("Store already holds {} courses, nothing to do", count)
        }
        SeedOutcome::Skipped(reason) => anyhow::bail!("seeding skipped: {}", reason),
    }
    Ok(())
}
