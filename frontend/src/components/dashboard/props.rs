use crate::api::BackendHandle;
use presenter::DashboardConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DashboardProps {
    pub backend: BackendHandle,
    pub config: DashboardConfig,
}
