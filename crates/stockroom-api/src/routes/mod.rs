//! Resource routers

pub mod config;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod imports;
pub mod inventory;
pub mod invoices;
pub mod items;
pub mod labels;
pub mod po;
pub mod sales;
pub mod trucks;
pub mod vendors;
