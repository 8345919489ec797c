mod app;

pub use app::AppService;
