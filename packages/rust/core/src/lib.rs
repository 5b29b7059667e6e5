//! Core handbook generation: reference tree building and the end-to-end
//! `generate` pipeline.

pub mod pipeline;
pub mod reference;
