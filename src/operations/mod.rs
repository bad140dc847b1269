pub mod add;
pub mod browse;
pub mod export;
pub mod import;
pub mod remove;
pub mod summary;
pub mod view;
