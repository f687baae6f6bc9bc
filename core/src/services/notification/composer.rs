//! Email composition
//!
//! One flat substitution function parameterized by a template and a
//! placeholder map; the verification and reset emails are the same
//! mechanism with different templates.

use chrono::{Datelike, Utc};

use super::traits::MailMessage;

/// Template for the email verification message
const VERIFY_EMAIL_TEMPLATE: &str = r#"<html>
  <body>
    <p>Hi {{user_name}},</p>
    <p>Welcome to {{app_name}}! Please confirm that {{user_email}} belongs to you
       by following the link below. The link is valid for {{expires_in}}.</p>
    <p><a href="{{verify_url}}">Verify your email</a></p>
    <p>If the button does not work, copy this address into your browser:<br>{{verify_url}}</p>
    <p>Questions? Reach us at {{support_email}}.</p>
    <p>&copy; {{year}} {{app_name}}</p>
  </body>
</html>"#;

/// Template for the password reset message
const RESET_PASSWORD_TEMPLATE: &str = r#"<html>
  <body>
    <p>Hi {{user_name}},</p>
    <p>We received a request to reset the password for your {{app_name}} account.
       The link below is valid for {{expires_in}}; requesting a new reset
       invalidates this one.</p>
    <p><a href="{{reset_url}}">Reset your password</a></p>
    <p>If you did not request this, you can safely ignore this email.</p>
    <p>&copy; {{year}} {{app_name}}</p>
  </body>
</html>"#;

/// Replace `{{placeholder}}` markers in a template
fn render(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in replacements {
        rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
    }
    rendered
}

/// Configuration for composing notification emails
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Application display name used in subjects and bodies
    pub app_name: String,
    /// Public base URL links are built on
    pub public_url: String,
    /// Support contact surfaced in the verification template
    pub support_email: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            app_name: "User Management".to_string(),
            public_url: "http://localhost:8000".to_string(),
            support_email: "support@localhost".to_string(),
        }
    }
}

/// Composes the workflow notification emails
#[derive(Debug, Clone)]
pub struct EmailComposer {
    config: ComposerConfig,
}

impl EmailComposer {
    /// Create a composer from configuration
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Compose the email verification message
    pub fn verification_email(
        &self,
        to_email: &str,
        user_name: &str,
        token: &str,
        expires_in_minutes: i64,
    ) -> MailMessage {
        let verify_url = format!("{}/verify-email/{}", self.config.public_url, token);
        let expires_in = format!("{} minutes", expires_in_minutes);
        let year = Utc::now().year().to_string();

        MailMessage {
            to: to_email.to_string(),
            subject: format!("Re: Verify your email for {}", self.config.app_name),
            html_body: render(
                VERIFY_EMAIL_TEMPLATE,
                &[
                    ("user_name", user_name),
                    ("app_name", &self.config.app_name),
                    ("user_email", to_email),
                    ("expires_in", &expires_in),
                    ("verify_url", &verify_url),
                    ("support_email", &self.config.support_email),
                    ("year", &year),
                ],
            ),
        }
    }

    /// Compose the password reset message
    pub fn reset_password_email(
        &self,
        to_email: &str,
        user_name: &str,
        token: &str,
        expires_in_minutes: i64,
    ) -> MailMessage {
        let reset_url = format!("{}/verify-password-reset/{}", self.config.public_url, token);
        let expires_in = format!("{} minutes", expires_in_minutes);
        let year = Utc::now().year().to_string();

        MailMessage {
            to: to_email.to_string(),
            subject: format!("Re: Password Reset Request for {}", self.config.app_name),
            html_body: render(
                RESET_PASSWORD_TEMPLATE,
                &[
                    ("user_name", user_name),
                    ("app_name", &self.config.app_name),
                    ("expires_in", &expires_in),
                    ("reset_url", &reset_url),
                    ("year", &year),
                ],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> EmailComposer {
        EmailComposer::new(ComposerConfig {
            app_name: "Acme Accounts".to_string(),
            public_url: "https://accounts.acme.test".to_string(),
            support_email: "help@acme.test".to_string(),
        })
    }

    #[test]
    fn test_render_replaces_all_occurrences() {
        let rendered = render("{{a}} and {{a}} and {{b}}", &[("a", "x"), ("b", "y")]);
        assert_eq!(rendered, "x and x and y");
    }

    #[test]
    fn test_verification_email_builds_link_from_public_url() {
        let message = composer().verification_email("a@x.com", "Ada Lovelace", "tok123", 60);

        assert_eq!(message.to, "a@x.com");
        assert!(message.subject.contains("Acme Accounts"));
        assert!(message
            .html_body
            .contains("https://accounts.acme.test/verify-email/tok123"));
        assert!(message.html_body.contains("Ada Lovelace"));
        assert!(message.html_body.contains("60 minutes"));
        // No unresolved placeholders left behind
        assert!(!message.html_body.contains("{{"));
    }

    #[test]
    fn test_reset_email_builds_link_from_public_url() {
        let message = composer().reset_password_email("a@x.com", "Ada Lovelace", "tok456", 60);

        assert!(message.subject.contains("Password Reset Request"));
        assert!(message
            .html_body
            .contains("https://accounts.acme.test/verify-password-reset/tok456"));
        assert!(!message.html_body.contains("{{"));
    }
}
