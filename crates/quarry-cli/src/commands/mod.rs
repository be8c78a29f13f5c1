pub mod ask;
pub mod chat;
pub mod schema;
pub mod serve;
