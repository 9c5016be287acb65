// Export all route modules
pub mod health;

// Re-export all route handlers for easy importing
pub use health::*;
