use sea_orm::sea_query::{Expr, Order};

/// Allow-listed sort columns of one entity.
///
/// Request names are matched exactly (case-sensitive); anything else resolves to
/// [`SortKey::DEFAULT`].
pub trait SortKey: Copy + PartialEq + Sized + 'static {
    /// Request name to column mapping.
    const ALLOWED: &'static [(&'static str, Self)];
    const DEFAULT: Self;

    /// The column expression used in `ORDER BY`.
    fn column(self) -> Expr;

    fn parse(name: Option<&str>) -> Self {
        name.and_then(|name| {
            Self::ALLOWED
                .iter()
                .find(|(allowed, _)| *allowed == name)
                .map(|(_, key)| *key)
        })
        .unwrap_or(Self::DEFAULT)
    }

    /// Request name of this key.
    fn name(self) -> &'static str {
        Self::ALLOWED
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `ASC` in any case is ascending; everything else, including absence, is descending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("ASC") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}
