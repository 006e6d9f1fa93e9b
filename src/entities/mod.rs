pub mod branch;
pub mod floor;
pub mod item;
pub mod rack;
pub mod sale;
pub mod sale_item;
pub mod user;

pub use branch::Entity as Branch;
pub use floor::Entity as Floor;
pub use item::Entity as Item;
pub use rack::Entity as Rack;
pub use sale::Entity as Sale;
pub use sale_item::Entity as SaleItem;
pub use user::Entity as User;
