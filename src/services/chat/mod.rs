//! Chat service: branch-aware assistant with a deterministic fallback.
//!
//! The remote assistant is optional. When it is unconfigured or fails for any
//! reason the rule-based responder answers from the live catalog, so the chat
//! endpoint never surfaces an error.

pub mod assistant;
pub mod recipes;
pub mod responder;

use crate::services::catalog::{BranchWithFloors, CatalogService};
use assistant::AssistantClient;
use responder::ResponderContext;
use tokio::sync::mpsc;
use tracing::{instrument, warn};

/// One unit of a streamed chat reply.
#[derive(Debug, Clone)]
pub enum ChatChunk {
    Content(String),
    Done,
}

#[derive(Clone)]
pub struct ChatService {
    catalog: CatalogService,
    assistant: Option<AssistantClient>,
}

impl ChatService {
    pub fn new(catalog: CatalogService, assistant: Option<AssistantClient>) -> Self {
        Self { catalog, assistant }
    }

    /// Streams a reply for a customer message into `tx`, always ending with
    /// `ChatChunk::Done`. Infallible by contract; catalog read failures
    /// degrade to an empty snapshot.
    #[instrument(skip(self, message, tx), fields(branch_id))]
    pub async fn stream_reply(&self, message: &str, branch_id: i32, tx: mpsc::Sender<ChatChunk>) {
        let items = match self.catalog.items_by_branch(branch_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Failed to load branch items for chat");
                Vec::new()
            }
        };
        let branch = match self.catalog.get_branch_with_details(branch_id).await {
            Ok(branch) => branch,
            Err(e) => {
                warn!(error = %e, "Failed to load branch snapshot for chat");
                None
            }
        };

        if let Some(client) = &self.assistant {
            let prompt = build_system_prompt(branch.as_ref(), message);
            match client.stream_completion(&prompt, &tx).await {
                Ok(()) => {
                    let _ = tx.send(ChatChunk::Done).await;
                    return;
                }
                Err(e) => warn!(error = %e, "Assistant unavailable, using fallback responder"),
            }
        }

        let ctx = ResponderContext {
            branch: branch.as_ref(),
            items: &items,
        };
        let reply = responder::generate_response(message, &ctx);
        for line in reply.split('\n') {
            if line.trim().is_empty() {
                continue;
            }
            if tx
                .send(ChatChunk::Content(format!("{}\n", line)))
                .await
                .is_err()
            {
                return;
            }
        }
        let _ = tx.send(ChatChunk::Done).await;
    }
}

/// System prompt carrying the branch inventory, floor by floor.
fn build_system_prompt(branch: Option<&BranchWithFloors>, message: &str) -> String {
    let mut inventory = String::new();
    if let Some(branch) = branch {
        for floor in &branch.floors {
            inventory.push_str(&format!("\n{}:\n", floor.floor.name));
            for rack in &floor.racks {
                inventory.push_str(&format!(
                    "  {} ({}):\n",
                    rack.rack.name,
                    rack.rack.category.as_deref().unwrap_or("General")
                ));
                for item in &rack.items {
                    inventory.push_str(&format!("    - {}: ₹{:.2}", item.name, item.price));
                    if item.discount > 0 {
                        inventory.push_str(&format!(
                            " ({}% off = ₹{:.2})",
                            item.discount,
                            item.discounted_price()
                        ));
                    }
                    inventory.push('\n');
                }
            }
        }
    }

    let store_name = branch
        .map(|b| b.branch.name.as_str())
        .unwrap_or("Smart Grocery Store");

    format!(
        "You are a helpful AI assistant for \"{store_name}\".\n\n\
         STORE INVENTORY (Organized by Floor > Rack):\n{inventory}\n\n\
         YOUR TASKS:\n\
         1. Answer questions about item locations (Floor, Rack).\n\
         2. Answer questions about prices and discounts.\n\
         3. When asked about discounts, list all items with discounts > 0%.\n\
         4. If a user asks for a recipe (e.g. \"Cake\", \"Biryani\"), list the ingredients \
         available in the store, their prices, locations, and the total cost.\n\
         5. Be concise and friendly.\n\
         6. If an item is not in the inventory, say \"Sorry, we don't have that item in stock.\"\n\n\
         User Question: {message}\n"
    )
}
