mod classify;
mod gallery;
mod resolver;

pub use classify::{LinkClassifier, LinkKind};
pub use gallery::extract_image_src;
pub use resolver::LinkResolver;
