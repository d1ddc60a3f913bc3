//! Request handlers, one module per resource.

pub mod notices;
pub mod settings;
