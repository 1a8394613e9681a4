use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, EntityTrait, Order, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::entities::flood_alert::{self, Column, Entity};
use crate::error::Result;
use crate::store::FloodStore;

/// A row of the `flood_alerts` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodAlertRow {
    pub id: String,
    pub region: Option<String>,
    pub alert_level: Option<String>,
    pub rainfall_mm: Option<f64>,
    pub message: Option<String>,
    pub priority: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a flood alert about to be recorded. Everything except the
/// message is optional; the read path applies display defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFloodAlert {
    pub region: Option<String>,
    pub alert_level: Option<String>,
    pub rainfall_mm: Option<f64>,
    pub message: Option<String>,
    pub priority: Option<String>,
}

fn to_row(m: flood_alert::Model) -> FloodAlertRow {
    FloodAlertRow {
        id: m.id,
        region: m.region,
        alert_level: m.alert_level,
        rainfall_mm: m.rainfall_mm,
        message: m.message,
        priority: m.priority,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

impl FloodStore {
    pub async fn insert_flood_alert(&self, alert: &NewFloodAlert) -> Result<FloodAlertRow> {
        let now = Utc::now().fixed_offset();
        let am = flood_alert::ActiveModel {
            id: Set(floodwatch_common::id::next_id()),
            region: Set(alert.region.clone()),
            alert_level: Set(alert.alert_level.clone()),
            rainfall_mm: Set(alert.rainfall_mm),
            message: Set(alert.message.clone()),
            priority: Set(alert.priority.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_row(model))
    }

    /// Newest-first flood alerts, at most `limit` rows.
    pub async fn list_flood_alerts(&self, limit: u64) -> Result<Vec<FloodAlertRow>> {
        let rows = Entity::find()
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_row).collect())
    }
}
