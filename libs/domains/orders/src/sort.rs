use list_query::SortKey;
use sea_orm::sea_query::Expr;

use crate::postgres::Orders;

/// Sortable order columns, most recent first by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSort {
    Id,
    OrderedAt,
    Total,
    Status,
}

impl SortKey for OrderSort {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("MaDonHang", Self::Id),
        ("NgayDatHang", Self::OrderedAt),
        ("TongTien", Self::Total),
        ("TrangThaiDonHang", Self::Status),
    ];
    const DEFAULT: Self = Self::OrderedAt;

    fn column(self) -> Expr {
        let column = match self {
            Self::Id => Orders::Id,
            Self::OrderedAt => Orders::OrderedAt,
            Self::Total => Orders::Total,
            Self::Status => Orders::Status,
        };
        Expr::col((Orders::Table, column))
    }
}
