/// Domain of the synthetic addresses the auth provider is given
pub const EMAIL_DOMAIN: &str = "flashcards.com";

/// Map a username onto the email-shaped identifier the provider requires.
///
/// Usernames differing only in case map to the same account.
///
/// # Examples
/// ```
/// use fc_api::auth::email::derive_email;
///
/// assert_eq!(derive_email("John"), "john@flashcards.com");
/// ```
pub fn derive_email(username: &str) -> String {
    format!("{}@{EMAIL_DOMAIN}", username.to_lowercase())
}
