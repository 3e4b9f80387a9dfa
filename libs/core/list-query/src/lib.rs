//! Bounded, parameterised list queries built from untrusted query-string input.
//!
//! Every list endpoint accepts the same parameters:
//!
//! | key | meaning |
//! |---|---|
//! | `vungmien` | region tag, equality filter |
//! | `search` | case-insensitive substring filter on entity-specific columns |
//! | `limit` | row cap, default [`DEFAULT_LIMIT`] |
//! | `sortBy` | sort column, checked against the entity's [`SortKey::ALLOWED`] list |
//! | `sortOrder` | `ASC` or anything else (descending) |
//!
//! Filter values are always bound parameters. The sort column can only ever be one
//! of the entity's allow-listed columns, so no request value reaches the SQL text.
//!
//! ```ignore
//! #[derive(Clone, Copy, PartialEq, Debug)]
//! enum ProductSort { Id, Name }
//!
//! impl SortKey for ProductSort {
//!     const ALLOWED: &'static [(&'static str, Self)] = &[("MaHangHoa", Self::Id), ("TenHangHoa", Self::Name)];
//!     const DEFAULT: Self = Self::Id;
//!     fn column(self) -> Expr { ... }
//! }
//!
//! let query = ListQuery::<ProductSort>::from_params(&params);
//! let cond = query.filter(Condition::all(), Some(region_col), &[name_col]);
//! stmt.cond_where(cond);
//! query.order_and_limit(&mut stmt);
//! ```

mod params;
mod sort;

pub use params::{ListParams, RegionParams, DEFAULT_LIMIT};
pub use sort::{SortDirection, SortKey};

use sea_orm::sea_query::{Condition, Expr, ExprTrait, Func, SelectStatement};

/// Validated form of [`ListParams`] for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<S> {
    pub region: Option<String>,
    pub search: Option<String>,
    pub limit: u64,
    pub sort: S,
    pub direction: SortDirection,
}

impl<S: SortKey> ListQuery<S> {
    pub fn from_params(params: &ListParams) -> Self {
        let sort = S::parse(params.sort_by.as_deref());
        let direction = SortDirection::from_param(params.sort_order.as_deref());
        tracing::trace!(sort = sort.name(), ?direction, "Resolved list ordering");

        Self {
            region: params.region(),
            search: params.search(),
            limit: params.limit(),
            sort,
            direction,
        }
    }

    /// Adds the region equality and the search match to `base`.
    ///
    /// The search matches when any of `search_columns` contains the fragment,
    /// ignoring case.
    pub fn filter(
        &self,
        base: Condition,
        region_column: Option<Expr>,
        search_columns: &[Expr],
    ) -> Condition {
        let mut cond = base;

        if let (Some(region), Some(column)) = (&self.region, region_column) {
            cond = cond.add(column.eq(region.as_str()));
        }

        if let Some(fragment) = &self.search {
            if !search_columns.is_empty() {
                let pattern = contains_pattern(fragment);
                let any = search_columns.iter().fold(Condition::any(), |any, column| {
                    any.add(Expr::expr(Func::lower(column.clone())).like(pattern.clone()))
                });
                cond = cond.add(any);
            }
        }

        cond
    }

    /// `ORDER BY <allow-listed column> <direction> LIMIT <cap>`
    pub fn order_and_limit(&self, stmt: &mut SelectStatement) {
        stmt.order_by_expr(self.sort.column(), self.direction.into())
            .limit(self.limit);
    }
}

/// `%fragment%`, lower-cased, with the LIKE metacharacters `%`, `_` and `\` escaped.
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
