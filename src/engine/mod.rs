pub mod models;
pub mod events;
pub mod turns;
pub mod reducer;
pub mod selectors;
pub mod invariants;
pub mod store;
pub mod bot;
pub mod arena;
