mod lookup;
mod query;
mod types;

pub use lookup::*;
pub use query::*;
