pub mod register;
pub mod screen;
pub mod send;
