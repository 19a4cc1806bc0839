// Library interface for testing

// Declare all modules
pub mod config;
pub mod constants;
pub mod queries;
pub mod schema;
pub mod serve;
pub mod speechace;
pub mod store;

// Re-export the part selector for convenience
pub use schema::Part;
