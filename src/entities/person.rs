use sea_orm::entity::prelude::*;

use crate::{
    mixins::{active, invalid},
    validation,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub full_name: String,
    pub created: i64,
    pub modified: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_film_work::Entity")]
    PersonFilmWork,
}

impl Related<super::person_film_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonFilmWork.def()
    }
}

impl Related<super::film_work::Entity> for Entity {
    fn to() -> RelationDef {
        super::person_film_work::Relation::FilmWork.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::person_film_work::Relation::Person.def().rev())
    }
}

fn check(model: &ActiveModel) -> Result<(), DbErr> {
    if let Some(full_name) = active(&model.full_name) {
        validation::required(full_name).map_err(|e| invalid("full_name", e))?;
    }
    Ok(())
}

crate::timestamped_behavior!(check, modified);
