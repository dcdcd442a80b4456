//! Homepage renderer and static builder for docfront sites.
//!
//! Renders the site front (navbar, hero, feature cards, footer) from a
//! validated [`docfront_config::Site`] and writes it to an output directory.

pub mod assets;
pub mod builder;
pub mod dom;
pub mod features;
pub mod links;
pub mod templates;

pub use assets::{AssetPipeline, AssetResolutionWarning, AssetResolver};
pub use builder::{BuildConfig, BuildError, BuildResult, CheckReport, StaticBuilder};
pub use dom::{Element, Node};
pub use features::{FeatureDescriptor, FeatureIssue, FeatureShowcase, RenderedShowcase};
pub use links::{BrokenLink, LinkChecker, LinkSource};
