use crate::{
    entities::{item, sale, sale_item, user},
    errors::ServiceError,
    services::{catalog, sales::local_day_start},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::instrument;

/// Statistics aggregator for the manager dashboards. Reports are best-effort
/// snapshots; sale lines whose item was deleted since the sale are skipped.
#[derive(Clone)]
pub struct StatsService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPurchase {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayCustomer {
    pub id: i32,
    pub name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub purchases: Vec<CustomerPurchase>,
    pub total_spent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldItemToday {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeastProduct {
    pub id: i32,
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    pub today_customers: Vec<TodayCustomer>,
    pub sold_items_today: Vec<SoldItemToday>,
    pub low_stock_items: Vec<LowStockItem>,
    pub today_revenue: f64,
    pub top_products: Vec<ProductSales>,
    pub least_products: Vec<LeastProduct>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedItem {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularCustomer {
    pub id: i32,
    pub name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub visit_count: i64,
    pub total_spent: f64,
    pub items: Vec<PurchasedItem>,
}

impl StatsService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Full manager dashboard for a branch. Everything keyed on "today" uses
    /// the local calendar day; revenue is summed from ledger totals, never
    /// recomputed from line items.
    #[instrument(skip(self))]
    pub async fn get_manager_stats(&self, branch_id: i32) -> Result<ManagerStats, ServiceError> {
        let branch_items = catalog::branch_items(&self.db, branch_id).await?;
        let branch_item_ids: Vec<i32> = branch_items.iter().map(|i| i.id).collect();

        let today = local_day_start();
        let today_sales = sale::Entity::find()
            .filter(sale::Column::BranchId.eq(branch_id))
            .filter(sale::Column::CreatedAt.gte(today))
            .all(&*self.db)
            .await?;

        let today_sale_ids: Vec<i32> = today_sales.iter().map(|s| s.id).collect();
        let today_lines = if today_sale_ids.is_empty() {
            Vec::new()
        } else {
            sale_item::Entity::find()
                .filter(sale_item::Column::SaleId.is_in(today_sale_ids))
                .all(&*self.db)
                .await?
        };

        // One item lookup for every line referenced today; deleted items
        // simply fall out of the map.
        let line_item_ids: Vec<i32> = {
            let mut ids: Vec<i32> = today_lines.iter().map(|l| l.item_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let items_by_id: HashMap<i32, item::Model> = if line_item_ids.is_empty() {
            HashMap::new()
        } else {
            item::Entity::find()
                .filter(item::Column::Id.is_in(line_item_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|i| (i.id, i))
                .collect()
        };

        let mut lines_by_sale: HashMap<i32, Vec<&sale_item::Model>> = HashMap::new();
        for l in &today_lines {
            lines_by_sale.entry(l.sale_id).or_default().push(l);
        }

        // Distinct customers in order of first appearance among today's sales.
        let mut customer_ids: Vec<i32> = Vec::new();
        for s in &today_sales {
            if let Some(uid) = s.user_id {
                if !customer_ids.contains(&uid) {
                    customer_ids.push(uid);
                }
            }
        }
        let users_by_id: HashMap<i32, user::Model> = if customer_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(customer_ids.clone()))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect()
        };

        let mut today_customers = Vec::with_capacity(customer_ids.len());
        for uid in customer_ids {
            let Some(u) = users_by_id.get(&uid) else {
                continue;
            };
            let mut purchases = Vec::new();
            let mut total_spent = 0.0_f64;
            for s in today_sales.iter().filter(|s| s.user_id == Some(uid)) {
                for line in lines_by_sale.get(&s.id).into_iter().flatten() {
                    let Some(item) = items_by_id.get(&line.item_id) else {
                        continue;
                    };
                    let total = line.price_at_sale * line.quantity as f64;
                    total_spent += total;
                    purchases.push(CustomerPurchase {
                        name: item.name.clone(),
                        quantity: line.quantity,
                        price: line.price_at_sale,
                        total,
                    });
                }
            }
            today_customers.push(TodayCustomer {
                id: u.id,
                name: u.name.clone(),
                username: u.username.clone(),
                phone: u.phone.clone(),
                purchases,
                total_spent,
            });
        }

        let mut quantities_today: BTreeMap<i32, i64> = BTreeMap::new();
        for line in &today_lines {
            *quantities_today.entry(line.item_id).or_default() += line.quantity as i64;
        }
        let sold_items_today: Vec<SoldItemToday> = quantities_today
            .into_iter()
            .filter_map(|(item_id, quantity)| {
                items_by_id.get(&item_id).map(|i| SoldItemToday {
                    id: i.id,
                    name: i.name.clone(),
                    category: i.category.clone(),
                    quantity,
                })
            })
            .collect();

        let low_stock_items: Vec<LowStockItem> = branch_items
            .iter()
            .filter(|i| i.stock < 10)
            .map(|i| LowStockItem {
                id: i.id,
                name: i.name.clone(),
                category: i.category.clone(),
                stock: i.stock,
            })
            .collect();

        let today_revenue: f64 = today_sales.iter().map(|s| s.total_amount).sum();

        let mut sold_all_time: HashMap<i32, i64> = HashMap::new();
        if !branch_item_ids.is_empty() {
            let sold = sale_item::Entity::find()
                .filter(sale_item::Column::ItemId.is_in(branch_item_ids))
                .all(&*self.db)
                .await?;
            for si in sold {
                *sold_all_time.entry(si.item_id).or_default() += si.quantity as i64;
            }
        }

        let mut ranked: Vec<(&item::Model, i64)> = branch_items
            .iter()
            .map(|i| (i, sold_all_time.get(&i.id).copied().unwrap_or(0)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));
        let top_products: Vec<ProductSales> = ranked
            .iter()
            .take(10)
            .map(|(i, q)| ProductSales {
                name: i.name.clone(),
                quantity: *q,
            })
            .collect();

        ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.id.cmp(&b.0.id)));
        let least_products: Vec<LeastProduct> = ranked
            .iter()
            .take(10)
            .map(|(i, q)| LeastProduct {
                id: i.id,
                name: i.name.clone(),
                quantity: *q,
            })
            .collect();

        Ok(ManagerStats {
            today_customers,
            sold_items_today,
            low_stock_items,
            today_revenue,
            top_products,
            least_products,
        })
    }

    /// Customers with two or more recorded sales at the branch, highest
    /// all-time spend first, each with their aggregate purchased items.
    #[instrument(skip(self))]
    pub async fn get_regular_customers(
        &self,
        branch_id: i32,
    ) -> Result<Vec<RegularCustomer>, ServiceError> {
        let branch_sales = sale::Entity::find()
            .filter(sale::Column::BranchId.eq(branch_id))
            .filter(sale::Column::UserId.is_not_null())
            .all(&*self.db)
            .await?;

        let mut by_user: HashMap<i32, (i64, f64, Vec<i32>)> = HashMap::new();
        for s in &branch_sales {
            let Some(uid) = s.user_id else { continue };
            let entry = by_user.entry(uid).or_insert((0, 0.0, Vec::new()));
            entry.0 += 1;
            entry.1 += s.total_amount;
            entry.2.push(s.id);
        }

        let mut regulars: Vec<(i32, i64, f64, Vec<i32>)> = by_user
            .into_iter()
            .filter(|(_, (visits, _, _))| *visits >= 2)
            .map(|(uid, (visits, spent, sale_ids))| (uid, visits, spent, sale_ids))
            .collect();
        regulars.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        if regulars.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = regulars.iter().map(|(uid, ..)| *uid).collect();
        let users_by_id: HashMap<i32, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let all_sale_ids: Vec<i32> = regulars
            .iter()
            .flat_map(|(_, _, _, ids)| ids.iter().copied())
            .collect();
        let lines = sale_item::Entity::find()
            .filter(sale_item::Column::SaleId.is_in(all_sale_ids))
            .all(&*self.db)
            .await?;

        let line_item_ids: Vec<i32> = {
            let mut ids: Vec<i32> = lines.iter().map(|l| l.item_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let items_by_id: HashMap<i32, item::Model> = if line_item_ids.is_empty() {
            HashMap::new()
        } else {
            item::Entity::find()
                .filter(item::Column::Id.is_in(line_item_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|i| (i.id, i))
                .collect()
        };

        let mut lines_by_sale: HashMap<i32, Vec<&sale_item::Model>> = HashMap::new();
        for l in &lines {
            lines_by_sale.entry(l.sale_id).or_default().push(l);
        }

        let mut result = Vec::with_capacity(regulars.len());
        for (uid, visit_count, total_spent, sale_ids) in regulars {
            let Some(u) = users_by_id.get(&uid) else {
                continue;
            };

            let mut purchased: BTreeMap<i32, PurchasedItem> = BTreeMap::new();
            for sale_id in &sale_ids {
                for line in lines_by_sale.get(sale_id).into_iter().flatten() {
                    let Some(item) = items_by_id.get(&line.item_id) else {
                        continue;
                    };
                    purchased
                        .entry(item.id)
                        .or_insert_with(|| PurchasedItem {
                            name: item.name.clone(),
                            quantity: 0,
                        })
                        .quantity += line.quantity as i64;
                }
            }

            result.push(RegularCustomer {
                id: u.id,
                name: u.name.clone(),
                username: u.username.clone(),
                phone: u.phone.clone(),
                visit_count,
                total_spent,
                items: purchased.into_values().collect(),
            });
        }

        Ok(result)
    }
}
