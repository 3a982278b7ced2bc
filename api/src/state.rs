use sea_orm::DatabaseConnection;
use services::scheduler::ReminderScheduler;
use services::sms::SmsTransport;
use std::sync::Arc;
use util::config;
use util::dates::Clock;

/// Shared handles every handler needs: the database, the hostel clock and the
/// reminder scheduler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    scheduler: Arc<ReminderScheduler>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn SmsTransport>,
    ) -> Self {
        let scheduler = ReminderScheduler::new(
            db.clone(),
            clock.clone(),
            transport,
            config::reminder_concurrency(),
        );
        Self {
            db,
            clock,
            scheduler: Arc::new(scheduler),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    pub fn scheduler_handle(&self) -> Arc<ReminderScheduler> {
        self.scheduler.clone()
    }
}
