pub mod table;
pub mod source;
pub mod record;

pub use table::*;
pub use source::*;
pub use record::*;
