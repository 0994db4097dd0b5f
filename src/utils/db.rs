/// Kind of integrity constraint a failed write ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    Check,
}

/// Classifies a database error as a constraint violation, returning the
/// violated constraint's name when PostgreSQL reports one.
pub fn violation(err: &sqlx::Error) -> Option<(Violation, Option<String>)> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };

    let kind = if db_err.is_unique_violation() {
        Violation::Unique
    } else if db_err.is_foreign_key_violation() {
        Violation::ForeignKey
    } else if db_err.is_check_violation() {
        Violation::Check
    } else {
        return None;
    };

    Some((kind, db_err.constraint().map(str::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_violations() {
        assert!(violation(&sqlx::Error::RowNotFound).is_none());
        assert!(violation(&sqlx::Error::PoolTimedOut).is_none());
    }
}
