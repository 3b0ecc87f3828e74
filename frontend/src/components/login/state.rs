#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthForm {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Default)]
pub struct LoginComponent {
    pub form: AuthForm,
    pub username: String,
    pub email: String,
    pub password: String,
    pub remember: bool,
    /// A request is in flight; the submit button shows its loader.
    pub submitting: bool,
    pub error: Option<String>,
}
