use crate::{
    entities::{item, sale, sale_item},
    errors::ServiceError,
    services::catalog,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Sales ledger. Records sale headers and frozen line items and decrements
/// stock; ledger rows are never recomputed after the fact.
#[derive(Clone)]
pub struct SalesService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub item_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub branch_id: i32,
    pub user_id: Option<i32>,
    pub items: Vec<SaleLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySale {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSalesEntry {
    pub name: String,
    pub quantity: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub daily_sales: Vec<DailySale>,
    pub top_items: Vec<ItemSalesEntry>,
    pub least_items: Vec<ItemSalesEntry>,
    pub items_sold_today: i64,
    pub low_stock_items: Vec<StockLevel>,
}

/// Start of the current local day, expressed as UTC for comparison against
/// stored timestamps.
pub(crate) fn local_day_start() -> DateTime<Utc> {
    let midnight = Local::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();
    match Local.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        chrono::LocalResult::None => Utc::now(),
    }
}

impl SalesService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a sale. Lines referencing unknown item ids are skipped; the
    /// remaining lines freeze their discounted unit price and decrement stock
    /// by the sold quantity. Stock is not guarded and may go negative.
    #[instrument(skip(self, request), fields(branch_id = request.branch_id))]
    pub async fn create_sale(
        &self,
        request: CreateSaleRequest,
    ) -> Result<sale::Model, ServiceError> {
        let requested_ids: Vec<i32> = request.items.iter().map(|l| l.item_id).collect();
        let mut items_by_id: HashMap<i32, item::Model> = if requested_ids.is_empty() {
            HashMap::new()
        } else {
            item::Entity::find()
                .filter(item::Column::Id.is_in(requested_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|i| (i.id, i))
                .collect()
        };

        let mut total = 0.0_f64;
        let mut lines: Vec<(i32, i32, f64)> = Vec::with_capacity(request.items.len());

        for line in &request.items {
            let Some(item) = items_by_id.get_mut(&line.item_id) else {
                warn!(item_id = line.item_id, "Sale line references unknown item, skipping");
                continue;
            };
            let price_at_sale = item.discounted_price();
            total += price_at_sale * line.quantity as f64;
            // Tracked in the map so repeated lines compound the decrement.
            item.stock -= line.quantity;
            lines.push((item.id, line.quantity, price_at_sale));
        }

        for item in items_by_id.into_values() {
            let stock = item.stock;
            let mut active: item::ActiveModel = item.into();
            active.stock = Set(stock);
            active.update(&*self.db).await?;
        }

        // items_count reflects the request, including skipped lines.
        let sale = sale::ActiveModel {
            branch_id: Set(request.branch_id),
            user_id: Set(request.user_id),
            total_amount: Set(total),
            items_count: Set(request.items.len() as i32),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        if !lines.is_empty() {
            let rows = lines.into_iter().map(|(item_id, quantity, price_at_sale)| {
                sale_item::ActiveModel {
                    sale_id: Set(sale.id),
                    item_id: Set(item_id),
                    quantity: Set(quantity),
                    price_at_sale: Set(price_at_sale),
                    ..Default::default()
                }
            });
            sale_item::Entity::insert_many(rows).exec(&*self.db).await?;
        }

        info!(sale_id = sale.id, total = sale.total_amount, "Recorded sale");
        Ok(sale)
    }

    /// Per-branch sales dashboard. Items that never sold still show up in the
    /// top/least lists with a zero quantity.
    #[instrument(skip(self))]
    pub async fn get_sales_stats(&self, branch_id: i32) -> Result<SalesStats, ServiceError> {
        let branch_items = catalog::branch_items(&self.db, branch_id).await?;
        let branch_item_ids: Vec<i32> = branch_items.iter().map(|i| i.id).collect();

        let branch_sales = sale::Entity::find()
            .filter(sale::Column::BranchId.eq(branch_id))
            .all(&*self.db)
            .await?;

        let today = local_day_start();
        let items_sold_today = branch_sales
            .iter()
            .filter(|s| s.created_at >= today)
            .count() as i64;

        let mut amounts_by_day: HashMap<String, f64> = HashMap::new();
        for s in &branch_sales {
            let day = s
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string();
            *amounts_by_day.entry(day).or_default() += s.total_amount;
        }
        let mut daily_sales: Vec<DailySale> = amounts_by_day
            .into_iter()
            .map(|(date, amount)| DailySale { date, amount })
            .collect();
        daily_sales.sort_by(|a, b| a.date.cmp(&b.date));
        if daily_sales.len() > 7 {
            daily_sales.drain(..daily_sales.len() - 7);
        }

        let mut sold_by_item: HashMap<i32, i64> = HashMap::new();
        if !branch_item_ids.is_empty() {
            let sold = sale_item::Entity::find()
                .filter(sale_item::Column::ItemId.is_in(branch_item_ids))
                .all(&*self.db)
                .await?;
            for si in sold {
                *sold_by_item.entry(si.item_id).or_default() += si.quantity as i64;
            }
        }

        let mut ranked: Vec<(&item::Model, i64)> = branch_items
            .iter()
            .map(|i| (i, sold_by_item.get(&i.id).copied().unwrap_or(0)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));

        let top_items: Vec<ItemSalesEntry> = ranked
            .iter()
            .take(5)
            .map(|(i, q)| ItemSalesEntry {
                name: i.name.clone(),
                quantity: *q,
                image_url: i.image_url.clone(),
            })
            .collect();
        let mut least_ranked = ranked.clone();
        least_ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.id.cmp(&b.0.id)));
        let least_items: Vec<ItemSalesEntry> = least_ranked
            .iter()
            .take(5)
            .map(|(i, q)| ItemSalesEntry {
                name: i.name.clone(),
                quantity: *q,
                image_url: i.image_url.clone(),
            })
            .collect();

        let low_stock_items: Vec<StockLevel> = branch_items
            .iter()
            .filter(|i| i.stock < 20)
            .map(|i| StockLevel {
                name: i.name.clone(),
                stock: i.stock,
            })
            .collect();

        Ok(SalesStats {
            daily_sales,
            top_items,
            least_items,
            items_sold_today,
            low_stock_items,
        })
    }
}
