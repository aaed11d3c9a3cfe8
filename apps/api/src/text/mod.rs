// Text analysis: tokenization and keyword statistics. Pure and synchronous.

pub mod keywords;
pub mod normalizer;

pub use normalizer::NormalizerProfile;
