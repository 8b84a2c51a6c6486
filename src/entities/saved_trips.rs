use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "saved_trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub cost: i64,
    pub duration: i64,
    pub trip_type: String,
    pub display_name: String,
    pub created_at: String, // RFC 3339, fixed microsecond precision so it sorts as text
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
