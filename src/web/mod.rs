//! Server-rendered pages.
//!
//! Uses Askama templates from `templates/`. Every page extends `base.html`,
//! which reads the shared [`handlers::Page`] header.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
