//! PostgreSQL implementation of CatalogRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, ExprTrait, Func, PostgresQueryBuilder, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DeriveIden, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, Statement,
};
use tracing::instrument;

use crate::entity::{branch, category, supplier};
use crate::error::CatalogResult;
use crate::models::{Branch, Category, CategoryInput, Supplier, SupplierInput};
use crate::repository::CatalogRepository;

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    CategoryId,
    SupplierId,
    Active,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

#[derive(Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// `SELECT COUNT(id) FROM products WHERE <column> = $1 AND active`
    fn count_products_statement(column: Products, id: i32) -> Statement {
        let (sql, values) = Query::select()
            .expr_as(Func::count(Expr::col(Products::Id)), Alias::new("total"))
            .from(Products::Table)
            .and_where(Expr::col(column).eq(id))
            .and_where(Expr::col(Products::Active).eq(true))
            .build(PostgresQueryBuilder);
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }

    async fn count_products(&self, column: Products, id: i32) -> CatalogResult<u64> {
        let row = CountRow::find_by_statement(Self::count_products_statement(column, id))
            .one(&self.db)
            .await?;
        Ok(row.map_or(0, |r| u64::try_from(r.total).unwrap_or(0)))
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let models = category::Entity::find()
            .filter(category::Column::Active.eq(true))
            .order_by_desc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn insert_category(&self, input: CategoryInput) -> CatalogResult<i32> {
        let model = category::ActiveModel::from(input).insert(&self.db).await?;
        tracing::info!(category_id = model.id, "Created category");
        Ok(model.id)
    }

    #[instrument(skip(self, input))]
    async fn update_category(&self, id: i32, input: CategoryInput) -> CatalogResult<bool> {
        let result = category::Entity::update_many()
            .col_expr(category::Column::Name, Expr::value(input.name))
            .col_expr(category::Column::Kind, Expr::value(input.kind))
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::Active.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn deactivate_category(&self, id: i32) -> CatalogResult<bool> {
        let result = category::Entity::update_many()
            .col_expr(category::Column::Active, Expr::value(false))
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::Active.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn count_category_products(&self, id: i32) -> CatalogResult<u64> {
        self.count_products(Products::CategoryId, id).await
    }

    #[instrument(skip(self))]
    async fn list_suppliers(&self) -> CatalogResult<Vec<Supplier>> {
        let models = supplier::Entity::find()
            .filter(supplier::Column::Active.eq(true))
            .order_by_desc(supplier::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn insert_supplier(&self, input: SupplierInput) -> CatalogResult<i32> {
        let model = supplier::ActiveModel::from(input).insert(&self.db).await?;
        tracing::info!(supplier_id = model.id, "Created supplier");
        Ok(model.id)
    }

    #[instrument(skip(self, input))]
    async fn update_supplier(&self, id: i32, input: SupplierInput) -> CatalogResult<bool> {
        let result = supplier::Entity::update_many()
            .col_expr(supplier::Column::Name, Expr::value(input.name))
            .col_expr(supplier::Column::Address, Expr::value(input.address))
            .col_expr(supplier::Column::Phone, Expr::value(input.phone))
            .col_expr(supplier::Column::Email, Expr::value(input.email))
            .filter(supplier::Column::Id.eq(id))
            .filter(supplier::Column::Active.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn deactivate_supplier(&self, id: i32) -> CatalogResult<bool> {
        let result = supplier::Entity::update_many()
            .col_expr(supplier::Column::Active, Expr::value(false))
            .filter(supplier::Column::Id.eq(id))
            .filter(supplier::Column::Active.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn count_supplier_products(&self, id: i32) -> CatalogResult<u64> {
        self.count_products(Products::SupplierId, id).await
    }

    #[instrument(skip(self))]
    async fn list_branches(&self) -> CatalogResult<Vec<Branch>> {
        let models = branch::Entity::find()
            .filter(branch::Column::Active.eq(true))
            .order_by_desc(branch::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn find_branch(&self, id: i32) -> CatalogResult<Option<Branch>> {
        let model = branch::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn category_row(id: i32, name: &str) -> category::Model {
        category::Model {
            id,
            name: name.to_string(),
            kind: None,
            active: true,
        }
    }

    #[test]
    fn test_count_statement_filters_active_products() {
        let stmt = PgCatalogRepository::count_products_statement(Products::SupplierId, 4);
        assert!(stmt.sql.contains(r#"COUNT("id")"#));
        assert!(stmt.sql.contains(r#""supplier_id" = $1"#));
        assert!(stmt.sql.contains(r#""active" = $2"#));
    }

    #[tokio::test]
    async fn test_list_categories_maps_models() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![category_row(3, "Gạo"), category_row(1, "Rau củ")]])
            .into_connection();
        let repo = PgCatalogRepository::new(db.clone());

        let categories = repo.list_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, 3);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"ORDER BY \"categories\".\"id\" DESC"#));
    }

    #[tokio::test]
    async fn test_count_category_products() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("total", Value::from(2i64))])]])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        assert_eq!(repo.count_category_products(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_count_supplier_products_without_row() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        assert_eq!(repo.count_supplier_products(7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deactivate_missing_supplier() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        assert!(!repo.deactivate_supplier(9).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_branch() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![branch::Model {
                id: 2,
                name: "Chi nhánh Đà Nẵng".into(),
                address: None,
                phone: None,
                region: "Miền Trung".into(),
                active: true,
            }]])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        let branch = repo.find_branch(2).await.unwrap().unwrap();
        assert_eq!(branch.region, "Miền Trung");
    }
}
