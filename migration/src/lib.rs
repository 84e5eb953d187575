pub use sea_orm_migration::prelude::*;

mod m20260801_000001_contests;
mod m20260801_000002_profiles;
mod m20260801_000003_contest_subscriptions;
mod m20260801_000004_reminders;
mod m20260801_000005_sync_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_contests::Migration),
            Box::new(m20260801_000002_profiles::Migration),
            Box::new(m20260801_000003_contest_subscriptions::Migration),
            Box::new(m20260801_000004_reminders::Migration),
            Box::new(m20260801_000005_sync_logs::Migration),
        ]
    }
}
