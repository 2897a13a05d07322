use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_without_next() {
        let form: LoginForm = serde_json::from_str(r#"{"username":"admin","password":"pw"}"#).unwrap();
        assert_eq!(form.username, "admin");
        assert_eq!(form.password, "pw");
        assert!(form.next.is_none());
    }
}
