pub mod sandbox_vis;
