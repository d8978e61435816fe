//! Component (inventory) store.

use super::{PatchableStore, RecordStore};
use crate::{
    entities::{Component as ComponentEntity, ComponentColumn, component},
    errors::{Error, Result},
    models::{Component, ComponentPatch, NewComponent},
};
use async_trait::async_trait;
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct ComponentStore {
    db: DatabaseConnection,
    account_id: String,
}

impl ComponentStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }

    async fn find(&self, id: i64) -> Result<component::Model> {
        ComponentEntity::find_by_id(id)
            .filter(ComponentColumn::AccountId.eq(self.account_id.as_str()))
            .one(&self.db)
            .await?
            .ok_or(Error::NotFound {
                entity: "component",
                id,
            })
    }
}

impl From<component::Model> for Component {
    fn from(row: component::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            min_stock: row.min_stock,
            category: row.category,
        }
    }
}

#[async_trait]
impl RecordStore for ComponentStore {
    type Record = Component;
    type Draft = NewComponent;

    const KIND: &'static str = "component";
    const PLURAL: &'static str = "components";

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<Component>> {
        let rows = ComponentEntity::find()
            .filter(ComponentColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_asc(ComponentColumn::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Component::from).collect())
    }

    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewComponent) -> Result<Component> {
        let model = component::ActiveModel {
            account_id: Set(self.account_id.clone()),
            name: Set(draft.name.trim().to_string()),
            quantity: Set(draft.quantity),
            unit_price: Set(draft.unit_price),
            min_stock: Set(draft.min_stock_or_default()),
            category: Set(draft.category_or_default()),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Created component {}", row.id);
        Ok(row.into())
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        ComponentEntity::delete_many()
            .filter(ComponentColumn::Id.eq(id))
            .filter(ComponentColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PatchableStore for ComponentStore {
    type Patch = ComponentPatch;

    #[instrument(skip(self, patch), fields(account = %self.account_id))]
    async fn update(&self, id: i64, patch: ComponentPatch) -> Result<Component> {
        let mut model = self.find(id).await?.into_active_model();

        if let Some(name) = patch.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(quantity) = patch.quantity {
            model.quantity = Set(quantity);
        }
        if let Some(unit_price) = patch.unit_price {
            model.unit_price = Set(unit_price);
        }
        if let Some(min_stock) = patch.min_stock {
            model.min_stock = Set(min_stock);
        }
        if let Some(category) = patch.category {
            model.category = Set(category);
        }

        let row = model.update(&self.db).await?;
        Ok(row.into())
    }
}
