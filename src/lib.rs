#![doc = "The `taskprime` library crate."]
#![doc = ""]
#![doc = "This crate contains the primality core, domain models, in-memory stores,"]
#![doc = "authentication mechanisms, routing configuration, and error handling for"]
#![doc = "the TaskPrime application. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod primality;
pub mod routes;
pub mod store;
