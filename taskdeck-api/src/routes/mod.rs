/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, me)
/// - `tasks`: Task endpoints (list, create, update, delete, clear completed)

pub mod health;
pub mod auth;
pub mod tasks;
