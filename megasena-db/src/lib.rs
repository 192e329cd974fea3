pub mod db;
pub mod error;
pub mod history;
pub mod models;
