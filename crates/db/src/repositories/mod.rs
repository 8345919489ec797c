mod app;

pub use app::AppRepository;
