use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    accounts::AccountSeeder, activity::ActivitySeeder, cohort::CohortSeeder,
    reminder::ReminderSeeder,
};
use colored::*;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use util::dates::SystemClock;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "Failed to connect to database:".red());
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {e}", "Failed to run migrations:".red());
        std::process::exit(1);
    }

    let clock = SystemClock::from_config();

    let seeders: Vec<(Box<dyn Seeder>, &str)> = vec![
        (Box::new(AccountSeeder), "Accounts"),
        (Box::new(CohortSeeder), "Students"),
        (Box::new(ReminderSeeder), "ReminderSettings"),
        (Box::new(ActivitySeeder), "Attendance and leave"),
    ];

    for (seeder, name) in seeders {
        if let Err(e) = run_seeder(&*seeder, name, &db, &clock).await {
            eprintln!("{} {e}", "Seeding aborted:".red());
            std::process::exit(1);
        }
    }
}
