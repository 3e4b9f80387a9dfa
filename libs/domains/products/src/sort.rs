use list_query::SortKey;
use sea_orm::sea_query::Expr;

use crate::postgres::Products;

/// Sortable product columns. Unknown `sortBy` values fall back to the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Id,
    Name,
    SalePrice,
    Stock,
    Region,
}

impl SortKey for ProductSort {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("MaHangHoa", Self::Id),
        ("TenHangHoa", Self::Name),
        ("DonGiaBan", Self::SalePrice),
        ("SoLuongTon", Self::Stock),
        ("VungMien", Self::Region),
    ];
    const DEFAULT: Self = Self::Id;

    fn column(self) -> Expr {
        let column = match self {
            Self::Id => Products::Id,
            Self::Name => Products::Name,
            Self::SalePrice => Products::SalePrice,
            Self::Stock => Products::Stock,
            Self::Region => Products::Region,
        };
        Expr::col((Products::Table, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sort_falls_back_to_id() {
        assert_eq!(ProductSort::parse(Some("DROP TABLE")), ProductSort::Id);
        assert_eq!(ProductSort::parse(Some("donGiaBan")), ProductSort::Id);
        assert_eq!(ProductSort::parse(None), ProductSort::Id);
    }

    #[test]
    fn test_allowed_sort_names() {
        assert_eq!(ProductSort::parse(Some("DonGiaBan")), ProductSort::SalePrice);
        assert_eq!(ProductSort::parse(Some("VungMien")), ProductSort::Region);
        assert_eq!(ProductSort::Stock.name(), "SoLuongTon");
    }
}
