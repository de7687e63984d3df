#![doc = "The `rentboard` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms, upload"]
#![doc = "validation, routing configuration, and error handling for the RentBoard"]
#![doc = "listing service, plus the typed listing client used by frontends. It is"]
#![doc = "used by the server binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod upload;
