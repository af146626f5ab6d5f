use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, StringLen};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub firstname: String,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub lastname: String,

    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub email: String,

    #[sea_orm(column_type = "String(StringLen::N(15))", nullable)]
    pub phone: Option<String>,

    pub age: i32,

    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub dept: String,

    /// Set once on insert, never touched by updates.
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
