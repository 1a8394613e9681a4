pub mod community_report;
pub mod flood_alert;
pub mod safe_zone;
pub mod sms_subscriber;
