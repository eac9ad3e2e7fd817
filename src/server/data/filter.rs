//! Case-insensitive column predicates.
//!
//! PostgreSQL and SQLite disagree on `ILIKE`, so both helpers compare
//! `LOWER(column)` against a lowercased value. Columns are qualified with their
//! table name so the predicates stay unambiguous inside joins.

use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ColumnTrait, Condition,
};

/// `LOWER(table.column) LIKE '%needle%'`
pub fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> Condition {
    let pattern = format!("%{}%", needle.trim().to_lowercase());

    Condition::all()
        .add(Expr::expr(Func::lower(Expr::col((column.entity_name(), column)))).like(pattern))
}

/// `LOWER(table.column) = lower(value)`
pub fn equals_ci<C: ColumnTrait>(column: C, value: &str) -> Condition {
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
            .eq(value.trim().to_lowercase()),
    )
}
