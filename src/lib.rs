#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

#[cfg(test)]
#[macro_use]
mod testing;

pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod forms;
pub mod routes;
pub mod schema;
pub mod templates;
