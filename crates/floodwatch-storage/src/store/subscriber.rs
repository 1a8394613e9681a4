use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter,
};
use serde::{Deserialize, Serialize};

use crate::entities::sms_subscriber::{self, Column, Entity};
use crate::error::Result;
use crate::store::FloodStore;

/// A row of the `sms_subscribers` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsSubscriberRow {
    pub id: String,
    pub phone_number: String,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSmsSubscriber {
    pub phone_number: String,
    pub region: Option<String>,
}

fn to_row(m: sms_subscriber::Model) -> SmsSubscriberRow {
    SmsSubscriberRow {
        id: m.id,
        phone_number: m.phone_number,
        region: m.region,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

impl FloodStore {
    pub async fn insert_sms_subscriber(
        &self,
        subscriber: &NewSmsSubscriber,
    ) -> Result<SmsSubscriberRow> {
        let now = Utc::now().fixed_offset();
        let am = sms_subscriber::ActiveModel {
            id: Set(floodwatch_common::id::next_id()),
            phone_number: Set(subscriber.phone_number.clone()),
            region: Set(subscriber.region.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_row(model))
    }

    /// Phone numbers of subscribers, optionally restricted to one region.
    /// A `None` region means the broadcast goes to everyone.
    pub async fn list_subscriber_phones(&self, region: Option<&str>) -> Result<Vec<String>> {
        let mut q = Entity::find();
        if let Some(region) = region {
            q = q.filter(Column::Region.eq(region));
        }
        let rows = q.all(self.db()).await?;
        Ok(rows.into_iter().map(|m| m.phone_number).collect())
    }
}
