mod executor;
mod searcher;

pub use self::executor::Executor;
pub use self::searcher::Searcher;
