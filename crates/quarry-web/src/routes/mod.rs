mod health;
mod sql;

pub use health::health_routes;
pub use sql::{sql_routes, Answer, Question, SqlState};
