//! Data-access layer over the hosted flood database.
//!
//! The application owns no storage of its own; everything here reads and
//! writes the externally hosted tables (`flood_alerts`, `safe_zones`,
//! `community_reports`, `sms_subscribers`) through a single [`store::FloodStore`].
//! Postgres in production and SQLite in tests, both behind the same SeaORM
//! connection.

pub mod entities;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{Result, StorageError};
pub use store::{
    CommunityReportRow, FloodAlertRow, FloodStore, NewCommunityReport, NewFloodAlert, NewSafeZone,
    NewSmsSubscriber, SafeZoneRow, SmsSubscriberRow,
};
