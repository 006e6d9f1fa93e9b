pub mod catalog;
pub mod chat;
pub mod qr;
pub mod sales;
pub mod stats;
