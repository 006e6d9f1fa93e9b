use crate::{
    entities::{branch, floor, item, rack, user},
    errors::ServiceError,
    services::qr,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

/// Catalog service managing the Branch → Floor → Rack → Item hierarchy.
///
/// Deletes cascade down the hierarchy at the application level; nested reads
/// resolve descendants with batched id-set queries.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchInput {
    #[validate(length(min = 1, message = "Branch name must not be empty"))]
    pub name: String,
    pub address: Option<String>,
    #[serde(default)]
    pub is_main_branch: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFloorInput {
    #[validate(length(min = 1, message = "Floor name must not be empty"))]
    pub name: String,
    pub floor_number: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFloorInput {
    pub name: Option<String>,
    pub floor_number: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRackInput {
    #[validate(length(min = 1, message = "Rack name must not be empty"))]
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRackInput {
    pub name: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemInput {
    #[validate(length(min = 1, message = "Item name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: i32,
    pub rack_id: i32,
    pub image_url: String,
    #[serde(default = "default_stock")]
    pub stock: i32,
}

fn default_stock() -> i32 {
    100
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: Option<i32>,
    pub rack_id: Option<i32>,
    pub image_url: Option<String>,
    pub stock: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: String,
    pub branch_id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub branch_id: Option<i32>,
    pub rack_id: Option<i32>,
}

/// Rack with its items, as served by the nested branch view.
#[derive(Debug, Clone, Serialize)]
pub struct RackWithItems {
    #[serde(flatten)]
    pub rack: rack::Model,
    pub items: Vec<item::Model>,
}

/// Floor with nested racks and items.
#[derive(Debug, Clone, Serialize)]
pub struct FloorWithRacks {
    #[serde(flatten)]
    pub floor: floor::Model,
    pub racks: Vec<RackWithItems>,
}

/// Branch with the full floor/rack/item tree.
#[derive(Debug, Clone, Serialize)]
pub struct BranchWithFloors {
    #[serde(flatten)]
    pub branch: branch::Model,
    pub floors: Vec<FloorWithRacks>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // === Branches ===

    #[instrument(skip(self))]
    pub async fn get_branch(&self, id: i32) -> Result<Option<branch::Model>, ServiceError> {
        Ok(branch::Entity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_branches(&self) -> Result<Vec<branch::Model>, ServiceError> {
        Ok(branch::Entity::find()
            .order_by_asc(branch::Column::Id)
            .all(&*self.db)
            .await?)
    }

    /// Creates a branch and stores its QR code in the same step. The QR payload
    /// needs the generated id, so the row is inserted first and updated once.
    #[instrument(skip(self))]
    pub async fn create_branch(
        &self,
        input: CreateBranchInput,
    ) -> Result<branch::Model, ServiceError> {
        let created = branch::ActiveModel {
            name: Set(input.name),
            address: Set(input.address),
            is_main_branch: Set(input.is_main_branch),
            qr_code: Set(None),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        let qr_code = qr::generate_branch_qr(created.id)?;
        let mut active: branch::ActiveModel = created.into();
        active.qr_code = Set(Some(qr_code));
        let updated = active.update(&*self.db).await?;

        info!(branch_id = updated.id, "Created branch");
        Ok(updated)
    }

    /// Deletes a branch and every floor, rack and item under it.
    #[instrument(skip(self))]
    pub async fn delete_branch(&self, id: i32) -> Result<(), ServiceError> {
        let floor_ids: Vec<i32> = floor::Entity::find()
            .filter(floor::Column::BranchId.eq(id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|f| f.id)
            .collect();

        self.delete_floor_subtrees(&floor_ids).await?;
        branch::Entity::delete_by_id(id).exec(&*self.db).await?;
        info!(branch_id = id, "Deleted branch");
        Ok(())
    }

    /// Resolves a scanned QR payload of the form `BRANCH_<id>`.
    #[instrument(skip(self))]
    pub async fn get_branch_by_qr(&self, qr_id: &str) -> Result<Option<branch::Model>, ServiceError> {
        let id = match qr_id.trim_start_matches("BRANCH_").parse::<i32>() {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        self.get_branch(id).await
    }

    /// Branch with its full floor → rack → item tree, floors ordered by number.
    #[instrument(skip(self))]
    pub async fn get_branch_with_details(
        &self,
        id: i32,
    ) -> Result<Option<BranchWithFloors>, ServiceError> {
        let Some(branch) = self.get_branch(id).await? else {
            return Ok(None);
        };

        let floors = self.floors_with_racks(id).await?;
        Ok(Some(BranchWithFloors { branch, floors }))
    }

    // === Floors ===

    #[instrument(skip(self))]
    pub async fn floors_with_racks(
        &self,
        branch_id: i32,
    ) -> Result<Vec<FloorWithRacks>, ServiceError> {
        let floors = floor::Entity::find()
            .filter(floor::Column::BranchId.eq(branch_id))
            .order_by_asc(floor::Column::FloorNumber)
            .all(&*self.db)
            .await?;

        let floor_ids: Vec<i32> = floors.iter().map(|f| f.id).collect();
        let racks = if floor_ids.is_empty() {
            Vec::new()
        } else {
            rack::Entity::find()
                .filter(rack::Column::FloorId.is_in(floor_ids.clone()))
                .all(&*self.db)
                .await?
        };

        let rack_ids: Vec<i32> = racks.iter().map(|r| r.id).collect();
        let items = if rack_ids.is_empty() {
            Vec::new()
        } else {
            item::Entity::find()
                .filter(item::Column::RackId.is_in(rack_ids))
                .all(&*self.db)
                .await?
        };

        let mut items_by_rack: HashMap<i32, Vec<item::Model>> = HashMap::new();
        for it in items {
            items_by_rack.entry(it.rack_id).or_default().push(it);
        }

        let mut racks_by_floor: HashMap<i32, Vec<RackWithItems>> = HashMap::new();
        for r in racks {
            let items = items_by_rack.remove(&r.id).unwrap_or_default();
            racks_by_floor
                .entry(r.floor_id)
                .or_default()
                .push(RackWithItems { rack: r, items });
        }

        Ok(floors
            .into_iter()
            .map(|f| {
                let racks = racks_by_floor.remove(&f.id).unwrap_or_default();
                FloorWithRacks { floor: f, racks }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn create_floor(
        &self,
        branch_id: i32,
        input: CreateFloorInput,
    ) -> Result<floor::Model, ServiceError> {
        Ok(floor::ActiveModel {
            branch_id: Set(branch_id),
            name: Set(input.name),
            floor_number: Set(input.floor_number),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?)
    }

    #[instrument(skip(self))]
    pub async fn update_floor(
        &self,
        id: i32,
        input: UpdateFloorInput,
    ) -> Result<floor::Model, ServiceError> {
        let existing = floor::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Floor {} not found", id)))?;

        let mut active: floor::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(number) = input.floor_number {
            active.floor_number = Set(number);
        }
        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_floor(&self, id: i32) -> Result<(), ServiceError> {
        self.delete_floor_subtrees(&[id]).await?;
        Ok(())
    }

    async fn delete_floor_subtrees(&self, floor_ids: &[i32]) -> Result<(), ServiceError> {
        if floor_ids.is_empty() {
            return Ok(());
        }

        let rack_ids: Vec<i32> = rack::Entity::find()
            .filter(rack::Column::FloorId.is_in(floor_ids.to_vec()))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        if !rack_ids.is_empty() {
            item::Entity::delete_many()
                .filter(item::Column::RackId.is_in(rack_ids.clone()))
                .exec(&*self.db)
                .await?;
            rack::Entity::delete_many()
                .filter(rack::Column::Id.is_in(rack_ids))
                .exec(&*self.db)
                .await?;
        }

        floor::Entity::delete_many()
            .filter(floor::Column::Id.is_in(floor_ids.to_vec()))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    // === Racks ===

    #[instrument(skip(self))]
    pub async fn racks_with_items(
        &self,
        floor_id: i32,
    ) -> Result<Vec<RackWithItems>, ServiceError> {
        let racks = rack::Entity::find()
            .filter(rack::Column::FloorId.eq(floor_id))
            .all(&*self.db)
            .await?;

        let rack_ids: Vec<i32> = racks.iter().map(|r| r.id).collect();
        let items = if rack_ids.is_empty() {
            Vec::new()
        } else {
            item::Entity::find()
                .filter(item::Column::RackId.is_in(rack_ids))
                .all(&*self.db)
                .await?
        };

        let mut items_by_rack: HashMap<i32, Vec<item::Model>> = HashMap::new();
        for it in items {
            items_by_rack.entry(it.rack_id).or_default().push(it);
        }

        Ok(racks
            .into_iter()
            .map(|r| {
                let items = items_by_rack.remove(&r.id).unwrap_or_default();
                RackWithItems { rack: r, items }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn create_rack(
        &self,
        floor_id: i32,
        input: CreateRackInput,
    ) -> Result<rack::Model, ServiceError> {
        Ok(rack::ActiveModel {
            floor_id: Set(floor_id),
            name: Set(input.name),
            category: Set(input.category),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?)
    }

    #[instrument(skip(self))]
    pub async fn update_rack(
        &self,
        id: i32,
        input: UpdateRackInput,
    ) -> Result<rack::Model, ServiceError> {
        let existing = rack::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Rack {} not found", id)))?;

        let mut active: rack::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(category) = input.category {
            active.category = Set(Some(category));
        }
        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_rack(&self, id: i32) -> Result<(), ServiceError> {
        item::Entity::delete_many()
            .filter(item::Column::RackId.eq(id))
            .exec(&*self.db)
            .await?;
        rack::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    // === Items ===

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i32) -> Result<Option<item::Model>, ServiceError> {
        Ok(item::Entity::find_by_id(id).one(&*self.db).await?)
    }

    /// Lists items by filter. A rack filter takes precedence over a branch
    /// filter; either one bypasses search/category, matching the original
    /// storefront contract.
    #[instrument(skip(self))]
    pub async fn list_items(&self, filters: ItemFilters) -> Result<Vec<item::Model>, ServiceError> {
        if let Some(rack_id) = filters.rack_id {
            return Ok(item::Entity::find()
                .filter(item::Column::RackId.eq(rack_id))
                .all(&*self.db)
                .await?);
        }

        if let Some(branch_id) = filters.branch_id {
            return self.items_by_branch(branch_id).await;
        }

        let mut query = item::Entity::find();
        if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(item::Column::Name.contains(search));
        }
        if let Some(category) = filters.category.as_deref().filter(|c| *c != "all") {
            query = query.filter(item::Column::Category.eq(category));
        }

        Ok(query.all(&*self.db).await?)
    }

    /// All items of a branch, resolved through the floor → rack id sets.
    #[instrument(skip(self))]
    pub async fn items_by_branch(&self, branch_id: i32) -> Result<Vec<item::Model>, ServiceError> {
        branch_items(&self.db, branch_id).await
    }

    #[instrument(skip(self))]
    pub async fn create_item(&self, input: CreateItemInput) -> Result<item::Model, ServiceError> {
        Ok(item::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            category: Set(input.category),
            price: Set(input.price),
            discount: Set(input.discount),
            rack_id: Set(input.rack_id),
            image_url: Set(input.image_url),
            stock: Set(input.stock),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: i32,
        input: UpdateItemInput,
    ) -> Result<item::Model, ServiceError> {
        let existing = self
            .get_item(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;

        let mut active: item::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(discount) = input.discount {
            active.discount = Set(discount);
        }
        if let Some(rack_id) = input.rack_id {
            active.rack_id = Set(rack_id);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
        }
        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i32) -> Result<(), ServiceError> {
        if let Some(existing) = self.get_item(id).await? {
            existing.delete(&*self.db).await?;
        }
        Ok(())
    }

    // === Users ===

    #[instrument(skip(self))]
    pub async fn users_by_branch(&self, branch_id: i32) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::BranchId.eq(branch_id))
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input), fields(role = %input.role))]
    pub async fn create_user(&self, input: CreateUserInput) -> Result<user::Model, ServiceError> {
        Ok(user::ActiveModel {
            username: Set(input.username),
            password: Set(input.password),
            role: Set(input.role),
            branch_id: Set(input.branch_id),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?)
    }
}

/// Items belonging to a branch, walked through the floor → rack id sets.
/// Shared with the sales and stats aggregations.
pub(crate) async fn branch_items(
    db: &DatabaseConnection,
    branch_id: i32,
) -> Result<Vec<item::Model>, ServiceError> {
    let floor_ids: Vec<i32> = floor::Entity::find()
        .filter(floor::Column::BranchId.eq(branch_id))
        .all(db)
        .await?
        .into_iter()
        .map(|f| f.id)
        .collect();
    if floor_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rack_ids: Vec<i32> = rack::Entity::find()
        .filter(rack::Column::FloorId.is_in(floor_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();
    if rack_ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(item::Entity::find()
        .filter(item::Column::RackId.is_in(rack_ids))
        .all(db)
        .await?)
}
