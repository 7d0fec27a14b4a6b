// Engine modules: physics, input, renderer, fixed-step runner

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
