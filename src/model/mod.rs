pub mod ad;
pub mod content;
pub mod device;
