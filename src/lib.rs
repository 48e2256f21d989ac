pub mod constants;

mod context;
mod extension;
mod negotiate;
mod options;
mod pattern;
mod policy;
mod resources;
mod response;
mod result;
mod route;
mod util;

pub use context::RequestContext;
pub use extension::Cors;
pub use negotiate::negotiate;
pub use options::CorsOptions;
pub use pattern::{Pattern, PatternError, PatternSet};
pub use policy::{ConfigurationError, Policy};
pub use resources::{Resource, ResourceRouter, Resources};
pub use response::{Headers, ResponseContext};
pub use result::CorsDecision;
pub use route::RouteCors;
