//! Interactive search chat for Tatva.
//!
//! Each message goes to the chat backend; result-bearing replies become
//! search capsules and redraw the map scene. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
