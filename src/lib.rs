pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod data_models;
pub mod error;
pub mod presenter;
pub mod view;

pub use api::{HttpSearchClient, SearchBackend};
pub use controller::{ResultsView, SearchController, SubmitOutcome};
pub use data_models::{Article, SearchRequest, SearchResponse};
pub use error::{Error, Result};
pub use presenter::{Card, ResultsContent, render_results};
