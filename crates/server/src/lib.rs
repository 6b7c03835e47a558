pub mod routes;
pub mod startup;
pub mod errors;
pub mod form;
pub mod openapi;

pub use startup::run;
