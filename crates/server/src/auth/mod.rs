pub mod cookies;
pub mod middleware;
