use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "genre_film_work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub film_work_id: Uuid,
    pub genre_id: Uuid,
    pub created: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::film_work::Entity",
        from = "Column::FilmWorkId",
        to = "super::film_work::Column::Id",
        on_delete = "Cascade"
    )]
    FilmWork,
    #[sea_orm(
        belongs_to = "super::genre::Entity",
        from = "Column::GenreId",
        to = "super::genre::Column::Id",
        on_delete = "Cascade"
    )]
    Genre,
}

impl Related<super::film_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmWork.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

fn check(_: &ActiveModel) -> Result<(), DbErr> {
    Ok(())
}

crate::timestamped_behavior!(check);
