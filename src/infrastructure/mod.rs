mod database;

// Re-export the factory function for easy access
pub use database::create_mongo_initializer;
