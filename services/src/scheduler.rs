//! Daily reminder timer.
//!
//! At most one timer task exists. Every change to it happens under the `timer` mutex,
//! and [`ReminderScheduler::apply_settings`] writes the settings row under that same
//! lock, so the stored row and the armed time cannot disagree. Each firing runs in its
//! own task and holds `dispatch_lock`, so two dispatches (timer or manual) never overlap
//! and aborting the timer never cuts a dispatch short.

use crate::error::ServiceResult;
use crate::reminder::{self, DispatchReport};
use crate::sms::SmsTransport;
use chrono::{DateTime, NaiveTime, Utc};
use db::models::reminder_setting;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};
use util::dates::{Clock, next_daily_occurrence};

struct Registration {
    at: NaiveTime,
    handle: JoinHandle<()>,
}

pub struct ReminderScheduler {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    transport: Arc<dyn SmsTransport>,
    concurrency: usize,
    timer: Mutex<Option<Registration>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl ReminderScheduler {
    pub fn new(
        db: DatabaseConnection,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn SmsTransport>,
        concurrency: usize,
    ) -> Self {
        Self {
            db,
            clock,
            transport,
            concurrency: concurrency.max(1),
            timer: Mutex::new(None),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Arms the timer from the stored settings. Called once at startup.
    pub async fn start(&self) -> ServiceResult<()> {
        let mut timer = self.timer.lock().await;
        let settings = reminder_setting::Model::current(&self.db).await?;
        self.arm(&mut timer, settings.as_ref());
        Ok(())
    }

    /// Validates and stores new settings, then re-arms the timer to match them.
    pub async fn apply_settings(
        &self,
        updated_by: i64,
        reminder_time: &str,
        is_active: bool,
    ) -> ServiceResult<reminder_setting::Model> {
        let mut timer = self.timer.lock().await;
        let saved = reminder::save_settings(&self.db, updated_by, reminder_time, is_active).await?;
        self.arm(&mut timer, Some(&saved));
        Ok(saved)
    }

    /// Replaces the registration in `timer`; inactive or absent settings disarm it.
    fn arm(&self, timer: &mut Option<Registration>, settings: Option<&reminder_setting::Model>) {
        if let Some(previous) = timer.take() {
            previous.handle.abort();
        }

        let Some(settings) = settings.filter(|s| s.is_active) else {
            info!("Reminder scheduler disabled");
            return;
        };

        let at = settings.reminder_time;
        let handle = tokio::spawn(run_timer(
            at,
            self.db.clone(),
            self.clock.clone(),
            self.transport.clone(),
            self.concurrency,
            self.dispatch_lock.clone(),
        ));
        *timer = Some(Registration { at, handle });

        let next = next_daily_occurrence(self.clock.now(), &self.clock.timezone(), at);
        info!(reminder_time = %at, next_run = %next, "Reminder scheduler armed");
    }

    /// Sends reminders immediately, whether or not the schedule is active.
    pub async fn send_now(&self) -> ServiceResult<DispatchReport> {
        let _guard = self.dispatch_lock.lock().await;
        reminder::dispatch(
            &self.db,
            self.clock.as_ref(),
            self.transport.as_ref(),
            self.concurrency,
        )
        .await
    }

    pub async fn scheduled_time(&self) -> Option<NaiveTime> {
        self.timer.lock().await.as_ref().map(|r| r.at)
    }

    pub async fn next_run(&self) -> Option<DateTime<Utc>> {
        let at = self.scheduled_time().await?;
        Some(next_daily_occurrence(
            self.clock.now(),
            &self.clock.timezone(),
            at,
        ))
    }

    /// Disarms the timer and waits for any in-flight dispatch to finish.
    pub async fn shutdown(&self) {
        if let Some(registration) = self.timer.lock().await.take() {
            registration.handle.abort();
        }
        let _ = self.dispatch_lock.lock().await;
        info!("Reminder scheduler stopped");
    }
}

/// Fires once per daily occurrence of `at`.
///
/// Each target is computed from the later of the clock and the target just fired, so
/// a wall clock lagging the sleep timer cannot yield the same occurrence twice.
async fn run_timer(
    at: NaiveTime,
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    transport: Arc<dyn SmsTransport>,
    concurrency: usize,
    dispatch_lock: Arc<Mutex<()>>,
) {
    let mut last_fired: Option<DateTime<Utc>> = None;
    loop {
        let now = clock.now();
        let anchor = last_fired.map_or(now, |fired| fired.max(now));
        let target = next_daily_occurrence(anchor, &clock.timezone(), at);
        let wait = (target - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;
        last_fired = Some(target);

        let db = db.clone();
        let clock = clock.clone();
        let transport = transport.clone();
        let lock = dispatch_lock.clone();
        tokio::spawn(async move {
            let _guard = lock.lock().await;
            if let Err(e) =
                reminder::dispatch(&db, clock.as_ref(), transport.as_ref(), concurrency).await
            {
                error!(error = %e, "Scheduled reminder dispatch failed");
            }
        });
    }
}
