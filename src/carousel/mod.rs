pub mod cursor;
pub mod machine;
pub mod remote;
