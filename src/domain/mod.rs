pub mod collision;
pub mod food;
pub mod geom;
pub mod snake;
