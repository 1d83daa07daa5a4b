pub mod artists;
pub mod favorites;
pub mod health;
pub mod search;
pub mod songs;
