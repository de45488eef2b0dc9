use sea_orm::entity::prelude::*;

use crate::{
    mixins::{active, invalid},
    validation,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "person_film_work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub person_id: Uuid,
    pub film_work_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub role: String,
    pub created: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id",
        on_delete = "Cascade"
    )]
    Person,
    #[sea_orm(
        belongs_to = "super::film_work::Entity",
        from = "Column::FilmWorkId",
        to = "super::film_work::Column::Id",
        on_delete = "Cascade"
    )]
    FilmWork,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::film_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmWork.def()
    }
}

fn check(model: &ActiveModel) -> Result<(), DbErr> {
    if let Some(role) = active(&model.role) {
        validation::required(role).map_err(|e| invalid("role", e))?;
    }
    Ok(())
}

crate::timestamped_behavior!(check);
