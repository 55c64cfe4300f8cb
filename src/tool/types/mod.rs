pub mod ball;
pub mod brush;
pub mod eraser;
pub mod spray;
