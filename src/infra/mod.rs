pub mod ntfy;
pub mod state;
pub mod x;
