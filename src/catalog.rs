//! Static table catalog.
//!
//! Every table the generator knows about, with the keywords that select it
//! and the fixed column list, ordering and limit used in its `SELECT`.
//!
//! | Table      | Columns                                 | Order              |
//! |------------|-----------------------------------------|--------------------|
//! | `users`    | id, name, email                         | created_at DESC    |
//! | `products` | id, name, price                         | id                 |
//! | `orders`   | id, user_id, total_amount, created_at   | created_at DESC    |

use serde::Serialize;
use std::fmt;

/// Row limit shared by every template.
pub const DEFAULT_LIMIT: usize = 10;

/// A table known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Users,
    Products,
    Orders,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Products => "products",
            Table::Orders => "orders",
        }
    }

    /// The catalog entry for this table.
    pub fn mapping(&self) -> &'static TableMapping {
        match self {
            Table::Users => &CATALOG[0],
            Table::Products => &CATALOG[1],
            Table::Orders => &CATALOG[2],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A single `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub column: &'static str,
    pub order: SortOrder,
}

impl fmt::Display for OrderBy {
    /// Ascending order is left implicit, as in `ORDER BY id`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            SortOrder::Asc => f.write_str(self.column),
            SortOrder::Desc => write!(f, "{} DESC", self.column),
        }
    }
}

/// Keywords, columns and ordering for one table.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TableMapping {
    pub table: Table,
    /// Lowercase keywords matched as substrings of the lowercased query.
    pub keywords: &'static [&'static str],
    pub columns: &'static [&'static str],
    pub order_by: OrderBy,
    pub limit: usize,
}

/// The catalog, in match priority order.
pub static CATALOG: [TableMapping; 3] = [
    TableMapping {
        table: Table::Users,
        keywords: &["사용자", "고객", "회원", "user", "customer", "member"],
        columns: &["id", "name", "email"],
        order_by: OrderBy { column: "created_at", order: SortOrder::Desc },
        limit: DEFAULT_LIMIT,
    },
    TableMapping {
        table: Table::Products,
        keywords: &["상품", "제품", "product", "item"],
        columns: &["id", "name", "price"],
        order_by: OrderBy { column: "id", order: SortOrder::Asc },
        limit: DEFAULT_LIMIT,
    },
    TableMapping {
        table: Table::Orders,
        keywords: &["주문", "구매", "order", "purchase"],
        columns: &["id", "user_id", "total_amount", "created_at"],
        order_by: OrderBy { column: "created_at", order: SortOrder::Desc },
        limit: DEFAULT_LIMIT,
    },
];

/// Names of all catalog tables, in priority order.
pub fn table_names() -> Vec<&'static str> {
    CATALOG.iter().map(|m| m.table.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_lookup_is_consistent() {
        for mapping in &CATALOG {
            assert_eq!(mapping.table.mapping(), mapping);
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for mapping in &CATALOG {
            for kw in mapping.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {kw} must be stored lowercase");
            }
        }
    }

    #[test]
    fn test_order_by_display() {
        assert_eq!(Table::Users.mapping().order_by.to_string(), "created_at DESC");
        assert_eq!(Table::Products.mapping().order_by.to_string(), "id");
    }

    #[test]
    fn test_table_names() {
        assert_eq!(table_names(), vec!["users", "products", "orders"]);
    }
}
