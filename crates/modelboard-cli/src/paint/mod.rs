//! Display adapters - paint card descriptors onto an output surface

pub mod html;
pub mod terminal;
