pub mod model;
pub mod repo;
pub mod services;
