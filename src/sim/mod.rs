//! Game simulation
//!
//! Everything that decides what happens in a frame lives here. Drawing goes
//! through the `renderer::GraphicsBackend` trait only.

pub mod collision;
pub mod direction;
pub mod game;
pub mod input;
pub mod particles;
pub mod scene;
pub mod state;
pub mod trail;

pub use collision::{Collision, ball_box_collision};
pub use direction::Direction;
pub use game::Game;
pub use input::{InputMask, Key};
pub use particles::{Particle, ParticleEmitter, ParticleGenerator};
pub use scene::{Scene, Viewport, ball_seat};
pub use state::{BallObject, BallSnapshot, GameObject, PlayState};
pub use trail::{TrailConfig, TrailSet};
