pub mod error;
pub mod poly;
pub mod prelude;

pub use poly::Polynomial;
