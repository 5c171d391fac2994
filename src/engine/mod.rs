pub mod banner;
pub mod gate;
pub mod injector;
pub mod resolver;
