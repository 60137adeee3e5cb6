mod feature_maker;

pub use feature_maker::FeatureMaker;
