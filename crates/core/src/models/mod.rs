pub mod history;
pub mod holding;
pub mod news;
pub mod portfolio;
pub mod prediction;
pub mod settings;
