//! Prior, likelihood and the log-posterior built from them.

pub mod evaluator;
pub mod likelihood;
pub mod prior;

pub use evaluator::{Posterior, PosteriorError, PosteriorEvaluator};
pub use likelihood::Likelihood;
pub use prior::{Prior, UniformBoxPrior};
