pub mod branches;
pub mod chat;
pub mod floors;
pub mod items;
pub mod manager;
pub mod racks;
pub mod sales;
pub mod users;
