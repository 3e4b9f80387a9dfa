use list_query::SortKey;
use sea_orm::sea_query::Expr;

use crate::postgres::Customers;

/// Sortable customer columns, newest registrations first by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSort {
    Id,
    Name,
    LoyaltyPoints,
    RegisteredAt,
}

impl SortKey for CustomerSort {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("MaKhachHang", Self::Id),
        ("TenKhachHang", Self::Name),
        ("DiemTichLuy", Self::LoyaltyPoints),
        ("NgayDangKy", Self::RegisteredAt),
    ];
    const DEFAULT: Self = Self::RegisteredAt;

    fn column(self) -> Expr {
        let column = match self {
            Self::Id => Customers::Id,
            Self::Name => Customers::Name,
            Self::LoyaltyPoints => Customers::LoyaltyPoints,
            Self::RegisteredAt => Customers::RegisteredAt,
        };
        Expr::col((Customers::Table, column))
    }
}
