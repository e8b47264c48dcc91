pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod isbn;
pub mod models;
pub mod seed;
pub mod services;
