use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect, Set, SqlErr};
use tracing::{debug, info};

use crate::db::{RepositoryError, TripRepository};
use crate::entities::{prelude::*, saved_trips};
use crate::models::trip::{SavedTrip, Trip};

/// Repository for trips the user has saved.
pub struct SavedTripRepository {
    conn: DatabaseConnection,
}

impl SavedTripRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn format_timestamp(at: DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn map_model(m: saved_trips::Model) -> Result<SavedTrip, RepositoryError> {
        let created_at = DateTime::parse_from_rfc3339(&m.created_at)
            .map_err(|e| {
                RepositoryError::Database(format!(
                    "Invalid created_at '{}' for trip {}: {e}",
                    m.created_at, m.id
                ))
            })?
            .with_timezone(&Utc);

        let cost = u64::try_from(m.cost)
            .map_err(|_| RepositoryError::Database(format!("Negative cost for trip {}", m.id)))?;
        let duration = u64::try_from(m.duration).map_err(|_| {
            RepositoryError::Database(format!("Negative duration for trip {}", m.id))
        })?;

        Ok(SavedTrip {
            trip: Trip {
                id: m.id,
                origin: m.origin,
                destination: m.destination,
                cost,
                duration,
                trip_type: m.trip_type,
                display_name: m.display_name,
            },
            created_at,
        })
    }

    fn map_insert_error(id: &str, err: DbErr) -> RepositoryError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::Duplicate(id.to_string()),
            _ => err.into(),
        }
    }
}

#[async_trait]
impl TripRepository for SavedTripRepository {
    async fn create(&self, trip: &Trip) -> Result<SavedTrip, RepositoryError> {
        let cost = i64::try_from(trip.cost)
            .map_err(|_| RepositoryError::Database(format!("Cost out of range: {}", trip.cost)))?;
        let duration = i64::try_from(trip.duration).map_err(|_| {
            RepositoryError::Database(format!("Duration out of range: {}", trip.duration))
        })?;

        let model = saved_trips::Model {
            id: trip.id.clone(),
            origin: trip.origin.clone(),
            destination: trip.destination.clone(),
            cost,
            duration,
            trip_type: trip.trip_type.clone(),
            display_name: trip.display_name.clone(),
            created_at: Self::format_timestamp(Utc::now()),
        };

        let active_model = saved_trips::ActiveModel {
            id: Set(model.id.clone()),
            origin: Set(model.origin.clone()),
            destination: Set(model.destination.clone()),
            cost: Set(model.cost),
            duration: Set(model.duration),
            trip_type: Set(model.trip_type.clone()),
            display_name: Set(model.display_name.clone()),
            created_at: Set(model.created_at.clone()),
        };

        SavedTrips::insert(active_model)
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| Self::map_insert_error(&trip.id, e))?;

        info!("Saved trip {} ({} -> {})", trip.id, trip.origin, trip.destination);
        Self::map_model(model)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SavedTrip>, RepositoryError> {
        SavedTrips::find_by_id(id.to_string())
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    async fn find_many(&self, limit: u64, offset: u64) -> Result<Vec<SavedTrip>, RepositoryError> {
        let rows = SavedTrips::find()
            .order_by_desc(saved_trips::Column::CreatedAt)
            .order_by_desc(saved_trips::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await?;

        debug!("Loaded {} saved trips (limit {}, offset {})", rows.len(), limit, offset);
        rows.into_iter().map(Self::map_model).collect()
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = SavedTrips::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await?;

        if result.rows_affected > 0 {
            info!("Deleted saved trip {}", id);
        }
        Ok(())
    }
}
