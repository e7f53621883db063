mod home;
mod loading;
mod quiz;
mod results;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use loading::LoadingView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use state::ViewError;
