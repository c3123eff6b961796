use std::path::PathBuf;

use crate::service::SurveyService;

#[derive(Clone)]
pub struct AppState {
    pub service: SurveyService,
    pub asset_dir: PathBuf,
    pub entry_page: PathBuf,
}

impl AppState {
    pub fn new(service: SurveyService, asset_dir: PathBuf, entry_page: PathBuf) -> Self {
        Self {
            service,
            asset_dir,
            entry_page,
        }
    }
}
