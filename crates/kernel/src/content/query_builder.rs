//! Plan query builder using SeaQuery.
//!
//! Generates the PostgreSQL SELECT for a [`QueryPlan`]:
//! - content type and status restriction
//! - taxonomy IN-filter through the item/term join table
//! - ordering with an id tie-break, or random order
//! - LIMIT
//!
//! It also builds the per-term count of published items.

use sea_query::{Alias, Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement};

use super::store::OrderKey;
use crate::selection::{OrderDirection, QueryPlan, StatusFilter};

/// Table holding content records.
pub const ITEM_TABLE: &str = "showcase_item";

/// Join table assigning taxonomy terms to content records.
pub const ITEM_TERM_TABLE: &str = "showcase_item_term";

/// Columns selected for each item; matches the store's row type.
const ITEM_COLUMNS: &[&str] = &["id", "title", "slug", "permalink", "excerpt", "body", "thumbnail"];

/// Query builder for query plans.
pub struct PlanQueryBuilder<'a> {
    plan: &'a QueryPlan,
}

impl<'a> PlanQueryBuilder<'a> {
    pub fn new(plan: &'a QueryPlan) -> Self {
        Self { plan }
    }

    /// Build the SELECT statement as SQL text.
    pub fn build(&self) -> String {
        self.statement().to_string(PostgresQueryBuilder)
    }

    /// Build the SELECT statement.
    pub fn statement(&self) -> SelectStatement {
        let mut query = Query::select();

        for column in ITEM_COLUMNS {
            query.column((Alias::new(ITEM_TABLE), Alias::new(*column)));
        }
        query.from(Alias::new(ITEM_TABLE));

        query.and_where(item_col("content_type").eq(self.plan.content_type.as_str()));
        query.and_where(item_col("status").eq(self.plan.status_filter.status()));

        self.add_taxonomy_filter(&mut query);
        self.add_sorts(&mut query);

        query.limit(u64::from(self.plan.limit));
        query
    }

    /// Restrict to items carrying at least one of the filter's terms.
    fn add_taxonomy_filter(&self, query: &mut SelectStatement) {
        let Some(filter) = &self.plan.taxonomy_filter else {
            return;
        };
        if filter.term_ids.is_empty() {
            return;
        }

        let terms = Query::select()
            .column(Alias::new("item_id"))
            .from(Alias::new(ITEM_TERM_TABLE))
            .and_where(Expr::col(Alias::new("taxonomy")).eq(filter.taxonomy.as_str()))
            .and_where(Expr::col(Alias::new("term_id")).is_in(filter.term_ids.iter().copied()))
            .to_owned();

        query.and_where(item_col("id").in_subquery(terms));
    }

    /// Add ORDER BY clauses.
    fn add_sorts(&self, query: &mut SelectStatement) {
        let key = OrderKey::from_field(&self.plan.order_field);
        let order = match self.plan.order_direction {
            OrderDirection::Asc => Order::Asc,
            OrderDirection::Desc => Order::Desc,
        };

        match key.column() {
            // Case-insensitive, byte-wise; matches the memory store's ordering.
            Some(column) if key == OrderKey::Title => {
                query.order_by_expr(
                    Expr::cust(format!("LOWER(\"{ITEM_TABLE}\".\"{column}\") COLLATE \"C\"")),
                    order.clone(),
                );
                query.order_by((Alias::new(ITEM_TABLE), Alias::new("id")), order);
            }
            Some(column) => {
                query.order_by((Alias::new(ITEM_TABLE), Alias::new(column)), order.clone());
                if key != OrderKey::Id {
                    query.order_by((Alias::new(ITEM_TABLE), Alias::new("id")), order);
                }
            }
            None => {
                query.order_by_expr(Expr::cust("RANDOM()"), Order::Asc);
            }
        }
    }
}

/// SQL counting published items per `(taxonomy, term_id)`.
pub fn term_count_query() -> String {
    Query::select()
        .column((Alias::new(ITEM_TERM_TABLE), Alias::new("taxonomy")))
        .column((Alias::new(ITEM_TERM_TABLE), Alias::new("term_id")))
        .expr_as(Expr::cust("COUNT(*)"), Alias::new("items"))
        .from(Alias::new(ITEM_TERM_TABLE))
        .inner_join(
            Alias::new(ITEM_TABLE),
            item_col("id").equals((Alias::new(ITEM_TERM_TABLE), Alias::new("item_id"))),
        )
        .and_where(item_col("status").eq(StatusFilter::PublishedOnly.status()))
        .group_by_col((Alias::new(ITEM_TERM_TABLE), Alias::new("taxonomy")))
        .group_by_col((Alias::new(ITEM_TERM_TABLE), Alias::new("term_id")))
        .to_string(PostgresQueryBuilder)
}

fn item_col(column: &str) -> Expr {
    Expr::col((Alias::new(ITEM_TABLE), Alias::new(column)))
}
