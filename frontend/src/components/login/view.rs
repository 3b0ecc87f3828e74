use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{AuthForm, LoginComponent};

pub fn view(component: &LoginComponent, ctx: &Context<LoginComponent>) -> Html {
    let link = ctx.link();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    let (title, submit_label, toggle) = match component.form {
        AuthForm::Login => (
            "Sign In",
            "Sign In",
            html! {
                <p class="form-toggle">
                    {"Don't have an account? "}
                    <button type="button" id="show-signup" onclick={link.callback(|_| Msg::ShowForm(AuthForm::Signup))}>
                        {"Sign up"}
                    </button>
                </p>
            },
        ),
        AuthForm::Signup => (
            "Create Account",
            "Sign Up",
            html! {
                <p class="form-toggle">
                    {"Already have an account? "}
                    <button type="button" id="show-login" onclick={link.callback(|_| Msg::ShowForm(AuthForm::Login))}>
                        {"Sign in"}
                    </button>
                </p>
            },
        ),
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>{ title }</h2>
                <form class="auth-form" {onsubmit}>
                    { build_fields(component, link) }
                    {
                        match &component.error {
                            Some(message) => html! { <div class="auth-error">{ message.clone() }</div> },
                            None => html! {},
                        }
                    }
                    <button type="submit" class="btn-primary" disabled={component.submitting}>
                        {
                            if component.submitting {
                                html! { <div class="spinner" /> }
                            } else {
                                html! { <span>{ submit_label }</span> }
                            }
                        }
                    </button>
                </form>
                { toggle }
            </div>
        </div>
    }
}

fn text_input(link: &Scope<LoginComponent>, make: fn(String) -> Msg) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| make(e.target_unchecked_into::<HtmlInputElement>().value()))
}

fn build_fields(component: &LoginComponent, link: &Scope<LoginComponent>) -> Html {
    let username = if component.form == AuthForm::Signup {
        html! {
            <label>
                {"Username"}
                <input type="text" required=true value={component.username.clone()} oninput={text_input(link, Msg::SetUsername)} />
            </label>
        }
    } else {
        html! {}
    };

    let remember = if component.form == AuthForm::Login {
        html! {
            <label class="remember">
                <input
                    type="checkbox"
                    checked={component.remember}
                    onchange={link.callback(|e: Event| Msg::SetRemember(e.target_unchecked_into::<HtmlInputElement>().checked()))}
                />
                {"Remember me"}
            </label>
        }
    } else {
        html! {}
    };

    html! {
        <>
            { username }
            <label>
                {"Email"}
                <input type="email" required=true value={component.email.clone()} oninput={text_input(link, Msg::SetEmail)} />
            </label>
            <label>
                {"Password"}
                <input type="password" required=true value={component.password.clone()} oninput={text_input(link, Msg::SetPassword)} />
            </label>
            { remember }
        </>
    }
}
