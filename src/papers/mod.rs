pub mod analysis;
pub mod csv;
pub mod export;
pub mod flatten;
pub mod rows;
pub mod summary;
pub mod types;
