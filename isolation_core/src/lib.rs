pub mod engine;
pub mod logic;
pub mod players;
pub mod worker;
