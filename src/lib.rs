//! Trainer Pokédex - terminal catalog over PokeAPI
//!
//! This library exposes the app's modules for the binary and for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod route;
pub mod session;
pub mod state;
pub mod type_icons;
