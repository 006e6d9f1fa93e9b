//! Deterministic fallback responder. Pure function of the message and the
//! catalog snapshot; serves whenever the remote assistant is unavailable.

use crate::entities::item;
use crate::services::catalog::{BranchWithFloors, FloorWithRacks, RackWithItems};

use super::recipes;

/// Catalog snapshot the responder classifies against.
pub struct ResponderContext<'a> {
    pub branch: Option<&'a BranchWithFloors>,
    pub items: &'a [item::Model],
}

/// Intent grammar, in priority order. First matching intent answers.
#[derive(Debug, Clone, Copy)]
enum Intent {
    DirectWant,
    Recipe,
    Location,
    Discount,
    Price,
    Layout,
    Suggestions,
}

const INTENT_CHAIN: &[Intent] = &[
    Intent::DirectWant,
    Intent::Recipe,
    Intent::Location,
    Intent::Discount,
    Intent::Price,
    Intent::Layout,
    Intent::Suggestions,
];

pub fn generate_response(message: &str, ctx: &ResponderContext<'_>) -> String {
    let lower = message.to_lowercase();
    for intent in INTENT_CHAIN {
        if intent.matches(&lower) {
            return intent.respond(&lower, ctx);
        }
    }
    fallback_help()
}

impl Intent {
    fn matches(self, lower: &str) -> bool {
        match self {
            Intent::DirectWant => {
                lower.contains("i want")
                    && !lower.contains("cook")
                    && !lower.contains("make")
                    && !lower.contains("recipe")
            }
            Intent::Recipe => {
                lower.contains("recipe")
                    || lower.contains("how to make")
                    || lower.contains("how to cook")
                    || lower.contains("make")
                    || lower.contains("cook")
                    || (lower.contains("want to")
                        && (lower.contains("cook") || lower.contains("make")))
            }
            Intent::Location => {
                lower.contains("where") || lower.contains("find") || lower.contains("location")
            }
            Intent::Discount => {
                lower.contains("discount")
                    || lower.contains("offer")
                    || lower.contains("sale")
                    || lower.contains("promo")
            }
            Intent::Price => {
                lower.contains("price") || lower.contains("cost") || lower.contains("how much")
            }
            Intent::Layout => {
                lower.contains("floor")
                    || lower.contains("section")
                    || lower.contains("vegetables")
                    || lower.contains("fruits")
                    || lower.contains("dairy")
                    || lower.contains("grocery")
            }
            Intent::Suggestions => {
                lower.contains("suggest")
                    || lower.contains("popular")
                    || lower.contains("trending")
                    || lower.contains("best")
            }
        }
    }

    fn respond(self, lower: &str, ctx: &ResponderContext<'_>) -> String {
        match self {
            Intent::DirectWant => direct_want(lower, ctx),
            Intent::Recipe => recipe(lower, ctx),
            Intent::Location => location(lower, ctx),
            Intent::Discount => discounts(ctx),
            Intent::Price => price(lower, ctx),
            Intent::Layout => layout(ctx),
            Intent::Suggestions => suggestions(ctx),
        }
    }
}

fn format_price(price: f64) -> String {
    format!("₹{:.2}", price)
}

/// Exact lowercase match first, then substring.
fn find_item_by_name<'a>(items: &'a [item::Model], name: &str) -> Option<&'a item::Model> {
    let name = name.to_lowercase();
    if name.is_empty() {
        return None;
    }
    items
        .iter()
        .find(|i| i.name.to_lowercase() == name)
        .or_else(|| items.iter().find(|i| i.name.to_lowercase().contains(&name)))
}

/// Any item whose name appears verbatim (lowercased) inside the message.
fn find_item_in_message<'a>(items: &'a [item::Model], lower: &str) -> Option<&'a item::Model> {
    items.iter().find(|i| lower.contains(&i.name.to_lowercase()))
}

fn locate_item<'a>(
    branch: Option<&'a BranchWithFloors>,
    item_id: i32,
) -> Option<(&'a FloorWithRacks, &'a RackWithItems)> {
    for floor in branch.map(|b| b.floors.as_slice()).unwrap_or_default() {
        for rack in &floor.racks {
            if rack.items.iter().any(|it| it.id == item_id) {
                return Some((floor, rack));
            }
        }
    }
    None
}

fn location_line(branch: Option<&BranchWithFloors>, item_id: i32) -> String {
    match locate_item(branch, item_id) {
        Some((floor, rack)) => format!(
            "{} ({}) on {}",
            rack.rack.name,
            rack.rack.category.as_deref().unwrap_or("General"),
            floor.floor.name
        ),
        None => "Location not recorded".to_string(),
    }
}

fn price_suffix(it: &item::Model) -> String {
    if it.discount > 0 {
        format!(
            " — {}% off (Final: {})",
            it.discount,
            format_price(it.discounted_price())
        )
    } else {
        String::new()
    }
}

fn direct_want(lower: &str, ctx: &ResponderContext<'_>) -> String {
    let product = lower
        .split("i want")
        .nth(1)
        .map(str::trim)
        .unwrap_or_default();
    if !product.is_empty() {
        if let Some(found) = ctx
            .items
            .iter()
            .find(|i| i.name.to_lowercase().contains(product))
        {
            let stock = if found.stock != 0 {
                found.stock.to_string()
            } else {
                "Available".to_string()
            };
            return format!(
                "🛒 **{}**\nCategory: {}\nLocation: {}\nPrice: {}{}\n\nIn stock: {}",
                found.name,
                found.category,
                location_line(ctx.branch, found.id),
                format_price(found.price),
                price_suffix(found),
                stock
            );
        }
    }
    fallback_help()
}

fn recipe(lower: &str, ctx: &ResponderContext<'_>) -> String {
    let Some((key, ingredients)) = recipes::find_recipe(lower) else {
        return "Which recipe would you like? Try \"i want to cook cucumber curry\", \
                \"egg fried rice\", \"carrot curry\", \"paneer curry\", \"chicken curry\", \
                or \"biryani\"."
            .to_string();
    };

    let title = key
        .split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut response = format!(
        "🍽️ **Recipe: {}**\n\nIngredients & where to find them:\n",
        title
    );
    let mut total = 0.0_f64;
    let mut missing: Vec<&str> = Vec::new();

    for ing in ingredients {
        match find_item_by_name(ctx.items, ing) {
            Some(found) => {
                let final_price = found.discounted_price();
                total += final_price;
                let discount_note = if found.discount > 0 {
                    format!(" ({}% off → {})", found.discount, format_price(final_price))
                } else {
                    String::new()
                };
                let loc = match locate_item(ctx.branch, found.id) {
                    Some((floor, rack)) => format!(
                        "{} ({}) on {}",
                        rack.rack.name,
                        rack.rack.category.as_deref().unwrap_or("General"),
                        floor.floor.name
                    ),
                    None => "Location: Not listed".to_string(),
                };
                response.push_str(&format!(
                    "• **{}** — {}{} — {}\n",
                    found.name,
                    format_price(found.price),
                    discount_note,
                    loc
                ));
            }
            None => missing.push(ing),
        }
    }

    if !missing.is_empty() {
        response.push_str(&format!(
            "\n⚠️ Missing from inventory: {}\n",
            missing.join(", ")
        ));
    }

    response.push_str(&format!(
        "\n🧾 **Estimated total (using discounted prices if available):** {}",
        format_price(total)
    ));
    response
}

fn location(lower: &str, ctx: &ResponderContext<'_>) -> String {
    match find_item_in_message(ctx.items, lower) {
        Some(found) => format!(
            "📍 **{}**\nCategory: {}\nLocation: {}\nPrice: {}{}",
            found.name,
            found.category,
            location_line(ctx.branch, found.id),
            format_price(found.price),
            price_suffix(found)
        ),
        None => "I can help you find products. Try \"Where is Kurkure?\" or use the exact \
                 product name."
            .to_string(),
    }
}

fn discounts(ctx: &ResponderContext<'_>) -> String {
    let mut discounted: Vec<&item::Model> =
        ctx.items.iter().filter(|i| i.discount > 0).collect();
    if discounted.is_empty() {
        return "We don't have active discounts right now.".to_string();
    }
    discounted.sort_by(|a, b| b.discount.cmp(&a.discount));

    let mut response = "🎉 **Current Discounts:**\n\n".to_string();
    for it in discounted.iter().take(10) {
        response.push_str(&format!(
            "• {}: {}% off — {} → {}\n",
            it.name,
            it.discount,
            format_price(it.price),
            format_price(it.discounted_price())
        ));
    }
    response
}

fn price(lower: &str, ctx: &ResponderContext<'_>) -> String {
    match find_item_in_message(ctx.items, lower) {
        Some(found) => {
            let discount_block = if found.discount > 0 {
                format!(
                    "\nDiscount: {}%\nFinal: {}",
                    found.discount,
                    format_price(found.discounted_price())
                )
            } else {
                String::new()
            };
            let loc = match locate_item(ctx.branch, found.id) {
                Some((floor, rack)) => format!(
                    "Location: {} ({}) on {}",
                    rack.rack.name,
                    rack.rack.category.as_deref().unwrap_or("General"),
                    floor.floor.name
                ),
                None => "Location: Not recorded".to_string(),
            };
            format!(
                "💰 **{}**\nRegular: {}{}\n{}",
                found.name,
                format_price(found.price),
                discount_block,
                loc
            )
        }
        None => "Which product price do you want to check? For example: \"What's the price \
                 of Dairy Milk?\""
            .to_string(),
    }
}

fn layout(ctx: &ResponderContext<'_>) -> String {
    let mut response = "🏢 **Store Layout:**\n\n".to_string();
    for floor in ctx.branch.map(|b| b.floors.as_slice()).unwrap_or_default() {
        let mut categories: Vec<&str> = Vec::new();
        for rack in &floor.racks {
            if let Some(cat) = rack.rack.category.as_deref() {
                if !categories.contains(&cat) {
                    categories.push(cat);
                }
            }
        }
        response.push_str(&format!(
            "• {}: {}\n",
            floor.floor.name,
            categories.join(", ")
        ));
    }
    response
}

fn suggestions(ctx: &ResponderContext<'_>) -> String {
    let mut ranked: Vec<&item::Model> = ctx.items.iter().collect();
    ranked.sort_by(|a, b| b.discount.cmp(&a.discount));

    let mut response = "⭐ **Recommendations:**\n\n".to_string();
    for it in ranked.iter().take(6) {
        if it.discount > 0 {
            response.push_str(&format!(
                "• {} — {}% off (Now {})\n",
                it.name,
                it.discount,
                format_price(it.discounted_price())
            ));
        } else {
            response.push_str(&format!("• {} — {}\n", it.name, format_price(it.price)));
        }
    }
    response
}

fn fallback_help() -> String {
    "👋 Hi — I can help with product locations, prices, discounts, and recipes. Try: \n\
     • \"Where is Kurkure?\" \n\
     • \"What's the price of Dairy Milk?\" \n\
     • \"Recipe for biryani\""
        .to_string()
}
