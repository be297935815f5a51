pub mod header;
pub mod help_overlay;
pub mod movie_grid;
pub mod vibe_input;
