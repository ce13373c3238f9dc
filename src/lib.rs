pub mod app;
pub mod core;
pub mod github;
pub mod notifications;
pub mod scanner;
