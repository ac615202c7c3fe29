mod mongo_initializer;

pub use mongo_initializer::create_mongo_initializer;
