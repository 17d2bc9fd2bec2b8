use serde::Deserialize;

use crate::api::Api;
use crate::view::ViewState;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Default)]
pub struct AppState {
    pub api: Option<Box<dyn Api>>,
    pub view: ViewState,
}
