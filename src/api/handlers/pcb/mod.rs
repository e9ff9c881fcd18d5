pub mod load;
pub mod serve;
pub mod types;
pub mod validate;

pub use types::*;

pub use load::load_pcb;
pub use serve::serve_pcb;
pub use validate::validate_path;
