pub mod accounts;
pub mod activity;
pub mod cohort;
pub mod reminder;
