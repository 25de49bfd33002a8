//! Request handlers.
//!
//! Page handlers serve JSON page data and map errors via [`AppError`].
//! Action handlers decode the body, call into [`crate::actions`], and
//! always answer with the action envelope.
//!
//! [`AppError`]: crate::error::AppError

pub mod admin_api;
pub mod admin_pages;
pub mod auth;
pub mod funnel;
pub mod health;
pub mod pages;
pub mod projects;
pub mod revalidate;
pub mod site_config;
