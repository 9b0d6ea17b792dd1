mod config;
mod fs;
mod handler;
mod request;
mod server;

pub mod encoding;
pub mod route;
pub mod router;

pub use config::Config;
pub use fs::FsError;
pub use fs::ServedDirectory;
pub use handler::RouteHandler;
pub use request::RequestContext;
pub use router::Router;
pub use server::Server;
pub use server::ServerBuildError;
