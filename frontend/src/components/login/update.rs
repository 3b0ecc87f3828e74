use common::requests::{LoginRequest, SignupRequest};
use presenter::auth;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::session;

use super::messages::Msg;
use super::state::{AuthForm, LoginComponent};

pub fn update(component: &mut LoginComponent, ctx: &Context<LoginComponent>, msg: Msg) -> bool {
    match msg {
        Msg::ShowForm(form) => {
            component.form = form;
            component.error = None;
            true
        }
        Msg::SetUsername(value) => {
            component.username = value;
            false
        }
        Msg::SetEmail(value) => {
            component.email = value;
            false
        }
        Msg::SetPassword(value) => {
            component.password = value;
            false
        }
        Msg::SetRemember(value) => {
            component.remember = value;
            false
        }
        Msg::Submit => {
            if component.submitting {
                return false;
            }
            component.error = None;

            let link = ctx.link().clone();
            let backend = ctx.props().backend.clone();
            match component.form {
                AuthForm::Login => {
                    let request = LoginRequest {
                        email: component.email.trim().to_string(),
                        password: component.password.clone(),
                        remember: component.remember,
                    };
                    spawn_local(async move {
                        let outcome = auth::login(&*backend, &request).await;
                        link.send_message(Msg::Settled(outcome));
                    });
                }
                AuthForm::Signup => {
                    let request = SignupRequest {
                        username: component.username.trim().to_string(),
                        email: component.email.trim().to_string(),
                        password: component.password.clone(),
                    };
                    if let Err(err) = auth::validate_signup(&request, &ctx.props().config) {
                        component.error = Some(err.to_string());
                        return true;
                    }
                    let config = ctx.props().config.clone();
                    spawn_local(async move {
                        let outcome = auth::signup(&*backend, &request, &config).await;
                        link.send_message(Msg::Settled(outcome));
                    });
                }
            }
            component.submitting = true;
            true
        }
        Msg::Settled(outcome) => {
            component.submitting = false;
            match outcome {
                Ok(user) => {
                    session::store_user(&user);
                    session::redirect(session::DASHBOARD_PATH);
                    false
                }
                Err(err) => {
                    component.error = Some(err.to_string());
                    true
                }
            }
        }
    }
}
