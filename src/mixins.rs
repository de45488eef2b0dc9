//! Field bundles shared by the catalog entities.
//!
//! Every entity carries a UUID primary key; primary entities also carry
//! `created`/`modified` Unix timestamps while association rows only record
//! `created`. [`timestamped_behavior!`](crate::timestamped_behavior) composes
//! these into an entity's `ActiveModelBehavior`.

use sea_orm::{ActiveValue, DbErr, Value, prelude::Uuid};

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn now() -> i64 {
    jiff::Timestamp::now().as_second()
}

pub fn format_timestamp(seconds: i64) -> String {
    match jiff::Timestamp::from_second(seconds) {
        Ok(ts) => ts.strftime("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Err(_) => seconds.to_string(),
    }
}

/// The value an active model would write, if any.
pub fn active<V: Into<Value>>(value: &ActiveValue<V>) -> Option<&V> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}

pub fn invalid(field: &str, message: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(format!("{field}: {message}"))
}

/// Implements `ActiveModelBehavior` for the `ActiveModel` in scope.
///
/// New models get a fresh UUID. Saving stamps `created` on insert and every
/// listed field (typically `modified`) on each save, then runs `$check` so
/// writes that bypass the catalog still honour the field invariants. `$check`
/// takes `&mut ActiveModel` and may fill derived columns.
#[macro_export]
macro_rules! timestamped_behavior {
    ($check:path $(, $stamp:ident)*) => {
        #[::async_trait::async_trait]
        impl sea_orm::ActiveModelBehavior for ActiveModel {
            fn new() -> Self {
                Self {
                    id: sea_orm::ActiveValue::Set($crate::mixins::new_id()),
                    ..<Self as sea_orm::ActiveModelTrait>::default()
                }
            }

            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, sea_orm::DbErr>
            where
                C: sea_orm::ConnectionTrait,
            {
                let now = $crate::mixins::now();
                if insert {
                    self.created = sea_orm::ActiveValue::Set(now);
                }
                $(self.$stamp = sea_orm::ActiveValue::Set(now);)*
                $check(&mut self)?;
                Ok(self)
            }
        }
    };
}
