pub mod listing;
pub mod move_service;
pub mod summary;
