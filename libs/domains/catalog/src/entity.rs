//! Sea-ORM entities for the reference tables

pub mod category {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "categories")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub kind: Option<String>,
        pub active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Category {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                kind: model.kind,
                active: model.active,
            }
        }
    }

    impl From<crate::models::CategoryInput> for ActiveModel {
        fn from(input: crate::models::CategoryInput) -> Self {
            ActiveModel {
                name: Set(input.name),
                kind: Set(input.kind),
                active: Set(true),
                ..Default::default()
            }
        }
    }
}

pub mod supplier {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "suppliers")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub address: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Supplier {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                address: model.address,
                phone: model.phone,
                email: model.email,
                active: model.active,
            }
        }
    }

    impl From<crate::models::SupplierInput> for ActiveModel {
        fn from(input: crate::models::SupplierInput) -> Self {
            ActiveModel {
                name: Set(input.name),
                address: Set(input.address),
                phone: Set(input.phone),
                email: Set(input.email),
                active: Set(true),
                ..Default::default()
            }
        }
    }
}

pub mod branch {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "branches")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub address: Option<String>,
        pub phone: Option<String>,
        pub region: String,
        pub active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Branch {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                address: model.address,
                phone: model.phone,
                region: model.region,
                active: model.active,
            }
        }
    }
}
