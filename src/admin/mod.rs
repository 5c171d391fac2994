pub mod metadata;
pub mod push;
