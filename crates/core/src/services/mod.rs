pub mod news_service;
pub mod portfolio_store;
