pub mod apply;
pub mod new;
pub mod normalize;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use new::{new, NewArgs};
pub use normalize::{normalize, NormalizeArgs};
pub use validate::{validate, ValidateArgs};
