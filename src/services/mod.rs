pub mod db_init;

pub mod catalog_service;
pub mod order_service;
pub mod session_store;
