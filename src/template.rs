//! SQL template filling, the third pipeline stage.
//!
//! Every statement has the same shape:
//!
//! ```text
//! SELECT <cols> FROM <table> ORDER BY <order> LIMIT <n>
//! ```
//!
//! All parts come from the static catalog, so no user text reaches the SQL.

use crate::catalog::{Table, TableMapping};

/// Trait for converting catalog entries to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for TableMapping {
    fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");

        // Columns
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }

        // FROM
        sql.push_str(" FROM ");
        sql.push_str(self.table.name());

        // ORDER BY
        sql.push_str(" ORDER BY ");
        sql.push_str(&self.order_by.to_string());

        // LIMIT
        sql.push_str(&format!(" LIMIT {}", self.limit));

        sql
    }
}

impl ToSql for Table {
    fn to_sql(&self) -> String {
        self.mapping().to_sql()
    }
}

/// Fill the template for `table`.
pub fn fill(table: Table) -> String {
    table.to_sql()
}
