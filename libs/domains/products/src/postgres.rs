//! PostgreSQL implementation of ProductRepository

use async_trait::async_trait;
use list_query::ListQuery;
use sea_orm::sea_query::{
    Alias, Condition, Expr, ExprTrait, PostgresQueryBuilder, Query, SelectStatement,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DeriveIden, EntityTrait,
    FromQueryResult, QueryFilter, Statement,
};
use tracing::instrument;

use crate::entity;
use crate::error::ProductResult;
use crate::models::{Product, ProductInput, RegionStatistics};
use crate::repository::ProductRepository;
use crate::sort::ProductSort;

#[derive(DeriveIden, Clone, Copy)]
pub enum Products {
    Table,
    Id,
    Name,
    CategoryId,
    SupplierId,
    Region,
    Unit,
    CostPrice,
    SalePrice,
    Stock,
    ExpiryDate,
    Active,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Kind,
}

#[derive(DeriveIden)]
enum Suppliers {
    Table,
    Id,
    Name,
    Address,
    Phone,
}

const REGION_STATISTICS_SQL: &str = r#"
    SELECT region,
           COUNT(*) AS product_count,
           COALESCE(SUM(stock), 0)::BIGINT AS total_stock,
           AVG(sale_price) AS average_price
    FROM products
    WHERE active = TRUE
    GROUP BY region
    ORDER BY region
"#;

#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Product columns plus category and supplier lookups (LEFT JOIN).
    fn select_products() -> SelectStatement {
        let columns = [
            Products::Id,
            Products::Name,
            Products::CategoryId,
            Products::SupplierId,
            Products::Region,
            Products::Unit,
            Products::CostPrice,
            Products::SalePrice,
            Products::Stock,
            Products::ExpiryDate,
            Products::Active,
        ];

        Query::select()
            .columns(columns.map(|c| (Products::Table, c)))
            .expr_as(
                Expr::col((Categories::Table, Categories::Name)),
                Alias::new("category_name"),
            )
            .expr_as(
                Expr::col((Categories::Table, Categories::Kind)),
                Alias::new("category_kind"),
            )
            .expr_as(
                Expr::col((Suppliers::Table, Suppliers::Name)),
                Alias::new("supplier_name"),
            )
            .expr_as(
                Expr::col((Suppliers::Table, Suppliers::Address)),
                Alias::new("supplier_address"),
            )
            .expr_as(
                Expr::col((Suppliers::Table, Suppliers::Phone)),
                Alias::new("supplier_phone"),
            )
            .from(Products::Table)
            .left_join(
                Categories::Table,
                Expr::col((Categories::Table, Categories::Id))
                    .equals((Products::Table, Products::CategoryId)),
            )
            .left_join(
                Suppliers::Table,
                Expr::col((Suppliers::Table, Suppliers::Id))
                    .equals((Products::Table, Products::SupplierId)),
            )
            .to_owned()
    }

    fn active() -> Condition {
        Condition::all().add(Expr::col((Products::Table, Products::Active)).eq(true))
    }

    /// The list statement for a validated query.
    pub fn list_statement(query: &ListQuery<ProductSort>) -> SelectStatement {
        let mut stmt = Self::select_products();
        stmt.cond_where(query.filter(
            Self::active(),
            Some(Expr::col((Products::Table, Products::Region))),
            &[Expr::col((Products::Table, Products::Name))],
        ));
        query.order_and_limit(&mut stmt);
        stmt
    }

    fn build(stmt: &SelectStatement) -> Statement {
        let (sql, values) = stmt.build(PostgresQueryBuilder);
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery<ProductSort>) -> ProductResult<Vec<Product>> {
        let stmt = Self::build(&Self::list_statement(query));
        let rows = Product::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn find_active(&self, id: i32) -> ProductResult<Option<Product>> {
        let mut stmt = Self::select_products();
        stmt.cond_where(
            Self::active().add(Expr::col((Products::Table, Products::Id)).eq(id)),
        );
        let row = Product::find_by_statement(Self::build(&stmt))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn insert(&self, input: ProductInput) -> ProductResult<i32> {
        let model = entity::ActiveModel::from(input).insert(&self.db).await?;
        tracing::info!(product_id = model.id, "Inserted product row");
        Ok(model.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<bool> {
        let result = entity::Entity::update_many()
            .set(entity::ActiveModel::from(input))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Active.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Active, Expr::value(false))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn region_statistics(&self) -> ProductResult<Vec<RegionStatistics>> {
        let stmt = Statement::from_string(DbBackend::Postgres, REGION_STATISTICS_SQL);
        let rows = RegionStatistics::find_by_statement(stmt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
