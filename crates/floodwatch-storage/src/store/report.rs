use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::entities::community_report::{self, Column, Entity};
use crate::error::Result;
use crate::store::FloodStore;

/// A row of the `community_reports` table. Reports are created by an
/// external upload flow; this service only reads them, and only the
/// approved ones are ever served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityReportRow {
    pub id: String,
    pub photo_url: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommunityReport {
    pub photo_url: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub approved: bool,
}

fn to_row(m: community_report::Model) -> CommunityReportRow {
    CommunityReportRow {
        id: m.id,
        photo_url: m.photo_url,
        description: m.description,
        latitude: m.latitude,
        longitude: m.longitude,
        approved: m.approved,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

impl FloodStore {
    pub async fn insert_community_report(
        &self,
        report: &NewCommunityReport,
    ) -> Result<CommunityReportRow> {
        let now = Utc::now().fixed_offset();
        let am = community_report::ActiveModel {
            id: Set(floodwatch_common::id::next_id()),
            photo_url: Set(report.photo_url.clone()),
            description: Set(report.description.clone()),
            latitude: Set(report.latitude),
            longitude: Set(report.longitude),
            approved: Set(report.approved),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_row(model))
    }

    /// Approved community reports, newest first, at most `limit` rows.
    pub async fn list_approved_reports(&self, limit: u64) -> Result<Vec<CommunityReportRow>> {
        let rows = Entity::find()
            .filter(Column::Approved.eq(true))
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_row).collect())
    }
}
