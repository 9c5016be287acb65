pub use sea_orm_migration::prelude::*;

mod m20251017_090000_create_fundraising_events_table;

pub use m20251017_090000_create_fundraising_events_table::fundraising_events_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251017_090000_create_fundraising_events_table::Migration)]
    }
}
