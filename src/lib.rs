//! Simulation core of a fixed-shooter arcade game: a swarm marching in lock
//! step, a bonus UFO, a boss with independent attack patterns and a player
//! whose held shot charges into a penetrating special.

pub mod audio;
pub mod battlefield;
pub mod collision;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod formation;
pub mod game_loop;
pub mod input;
pub mod render;
pub mod score;
pub mod screens;
pub mod snapshot;
