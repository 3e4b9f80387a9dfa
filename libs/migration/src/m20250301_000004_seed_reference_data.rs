use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One branch per region
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO branches (id, name, address, phone, region, active)
            VALUES
                (1, 'Chi nhánh Hà Nội', 'Hà Nội', '024 0000 0001', 'Miền Bắc', true),
                (2, 'Chi nhánh Đà Nẵng', 'Đà Nẵng', '0236 000 0002', 'Miền Trung', true),
                (3, 'Chi nhánh TP.HCM', 'TP. Hồ Chí Minh', '028 0000 0003', 'Miền Nam', true)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO categories (id, name, kind, active)
            VALUES
                (1, 'Rau củ', 'Nông sản tươi', true),
                (2, 'Trái cây', 'Nông sản tươi', true),
                (3, 'Gạo và ngũ cốc', 'Nông sản khô', true)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        // Keep the serial sequences ahead of the explicit ids above
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            SELECT setval(pg_get_serial_sequence('branches', 'id'), (SELECT MAX(id) FROM branches));
            SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories));
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DELETE FROM categories WHERE id IN (1, 2, 3); DELETE FROM branches WHERE id IN (1, 2, 3)",
            )
            .await?;
        Ok(())
    }
}
