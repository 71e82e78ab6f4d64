pub mod registry;
pub mod xinge;
