pub mod errors;
pub mod item;
pub mod routes;
pub mod startup;

pub use startup::run;
