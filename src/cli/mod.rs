pub mod edit;
pub mod setup;
pub mod summary;
pub mod ui;
