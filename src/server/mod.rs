pub mod dispatcher;
pub mod listener;

pub use dispatcher::Dispatcher;
pub use listener::NewsServer;
