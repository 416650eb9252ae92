//! Shared types between the admin frontend and the backend service.

pub mod system;
