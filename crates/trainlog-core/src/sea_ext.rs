use sea_orm::{DbErr, SqlErr};

pub trait DbErrExt {
    /// Driver message of a unique-constraint violation, if this error is one.
    fn unique_violation(&self) -> Option<String>;

    /// Whether this error violated a unique constraint whose message mentions `column`.
    fn violates_unique(&self, column: &str) -> bool {
        self.unique_violation()
            .is_some_and(|message| message.contains(column))
    }
}

impl DbErrExt for DbErr {
    fn unique_violation(&self) -> Option<String> {
        match self.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
            _ => None,
        }
    }
}
