pub mod middleware;
pub mod prometheus;
