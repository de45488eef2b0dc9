use sea_orm::entity::prelude::*;

use crate::{
    mixins::{active, invalid},
    validation,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "genre")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created: i64,
    pub modified: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::genre_film_work::Entity")]
    GenreFilmWork,
}

impl Related<super::genre_film_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenreFilmWork.def()
    }
}

impl Related<super::film_work::Entity> for Entity {
    fn to() -> RelationDef {
        super::genre_film_work::Relation::FilmWork.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::genre_film_work::Relation::Genre.def().rev())
    }
}

fn check(model: &ActiveModel) -> Result<(), DbErr> {
    if let Some(name) = active(&model.name) {
        validation::required_max(name, validation::NAME_MAX).map_err(|e| invalid("name", e))?;
    }
    Ok(())
}

crate::timestamped_behavior!(check, modified);
