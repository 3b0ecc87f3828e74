use common::model::user::CurrentUser;
use presenter::DashboardError;

use super::state::AuthForm;

pub enum Msg {
    ShowForm(AuthForm),
    SetUsername(String),
    SetEmail(String),
    SetPassword(String),
    SetRemember(bool),
    Submit,
    Settled(Result<CurrentUser, DashboardError>),
}
