use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_initial_schema"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(UP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DOWN_SQL)
            .await?;
        Ok(())
    }
}

// Plain SQL kept portable between Postgres (hosted database) and SQLite
// (test databases).
const UP_SQL: &str = "
CREATE TABLE IF NOT EXISTS flood_alerts (
    id TEXT PRIMARY KEY NOT NULL,
    region TEXT,
    alert_level TEXT,
    rainfall_mm DOUBLE PRECISION,
    message TEXT,
    priority TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_flood_alerts_created_at ON flood_alerts(created_at DESC);

CREATE TABLE IF NOT EXISTS safe_zones (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT,
    capacity INTEGER,
    location TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS community_reports (
    id TEXT PRIMARY KEY NOT NULL,
    photo_url TEXT NOT NULL,
    description TEXT,
    latitude DOUBLE PRECISION NOT NULL,
    longitude DOUBLE PRECISION NOT NULL,
    approved BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_community_reports_approved ON community_reports(approved);

CREATE TABLE IF NOT EXISTS sms_subscribers (
    id TEXT PRIMARY KEY NOT NULL,
    phone_number TEXT NOT NULL UNIQUE,
    region TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sms_subscribers_region ON sms_subscribers(region);
";

const DOWN_SQL: &str = "
DROP TABLE IF EXISTS sms_subscribers;
DROP TABLE IF EXISTS community_reports;
DROP TABLE IF EXISTS safe_zones;
DROP TABLE IF EXISTS flood_alerts;
";
