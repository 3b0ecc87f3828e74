use crate::api::BackendHandle;
use presenter::DashboardConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LoginProps {
    pub backend: BackendHandle,
    pub config: DashboardConfig,
}
