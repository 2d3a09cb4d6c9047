//! Database record models matching table schemas.
//!
//! Row structs derive `sqlx::FromRow` and mirror their table column by column. Conversion into the
//! types handed to callers is an explicit `From` impl, so a column change shows up as a compile
//! error rather than a runtime scanning failure.
//!
//! - [`users`]: the `users` table and the [`users::User`] entity

pub mod users;
