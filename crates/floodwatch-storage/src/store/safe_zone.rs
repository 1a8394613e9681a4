use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::entities::safe_zone::{self, Entity};
use crate::error::Result;
use crate::store::FloodStore;

/// A row of the `safe_zones` table. The `location` column holds the GeoJSON
/// point geometry exactly as the upload flow wrote it; parsing and
/// validation happen at the API layer so malformed rows can be skipped with
/// a warning rather than failing the whole listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeZoneRow {
    pub id: String,
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSafeZone {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
}

fn to_row(m: safe_zone::Model) -> SafeZoneRow {
    SafeZoneRow {
        id: m.id,
        name: m.name,
        capacity: m.capacity,
        location: m.location,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

impl FloodStore {
    pub async fn insert_safe_zone(&self, zone: &NewSafeZone) -> Result<SafeZoneRow> {
        let now = Utc::now().fixed_offset();
        let am = safe_zone::ActiveModel {
            id: Set(floodwatch_common::id::next_id()),
            name: Set(zone.name.clone()),
            capacity: Set(zone.capacity),
            location: Set(zone.location.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_row(model))
    }

    /// Safe zones in insertion order, at most `limit` rows.
    pub async fn list_safe_zones(&self, limit: u64) -> Result<Vec<SafeZoneRow>> {
        let rows = Entity::find().limit(limit).all(self.db()).await?;
        Ok(rows.into_iter().map(to_row).collect())
    }
}
