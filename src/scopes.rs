//! Gmail OAuth scope identifiers.

use strum::{Display, EnumString};

pub const GMAIL_READONLY: &str = "https://www.googleapis.com/auth/gmail.readonly";
pub const GMAIL_COMPOSE: &str = "https://www.googleapis.com/auth/gmail.compose";
pub const GMAIL_SEND: &str = "https://www.googleapis.com/auth/gmail.send";
pub const GMAIL_INSERT: &str = "https://www.googleapis.com/auth/gmail.insert";
pub const GMAIL_LABELS: &str = "https://www.googleapis.com/auth/gmail.labels";
pub const GMAIL_METADATA: &str = "https://www.googleapis.com/auth/gmail.metadata";
pub const GMAIL_MODIFY: &str = "https://www.googleapis.com/auth/gmail.modify";
pub const GMAIL_SETTINGS_BASIC: &str = "https://www.googleapis.com/auth/gmail.settings.basic";
pub const GMAIL_SETTINGS_SHARING: &str = "https://www.googleapis.com/auth/gmail.settings.sharing";
pub const MAIL_GOOGLE_COM: &str = "https://mail.google.com/";
pub const GMAIL_ADDONS_CURRENT_MESSAGE_METADATA: &str =
    "https://www.googleapis.com/auth/gmail.addons.current.message.metadata";
pub const GMAIL_ADDONS_CURRENT_MESSAGE_READONLY: &str =
    "https://www.googleapis.com/auth/gmail.addons.current.message.readonly";
pub const GMAIL_ADDONS_CURRENT_MESSAGE_ACTION: &str =
    "https://www.googleapis.com/auth/gmail.addons.current.message.action";
pub const GMAIL_ADDONS_CURRENT_ACTION_COMPOSE: &str =
    "https://www.googleapis.com/auth/gmail.addons.current.action.compose";

/// Permission scopes supported by the Gmail API.
///
/// `Display` yields the scope URL sent to Google. `FromStr` accepts either
/// the URL or the short name (`send`, `readonly`, `full-access`, ...).
///
/// # Example
/// ```
/// use gmail_auth::scopes::Scope;
///
/// let scope: Scope = "send".parse().unwrap();
/// assert_eq!(scope, Scope::Send);
/// assert_eq!(scope.as_str(), "https://www.googleapis.com/auth/gmail.send");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Scope {
    #[strum(serialize = "readonly", to_string = "https://www.googleapis.com/auth/gmail.readonly")]
    Readonly,
    #[strum(serialize = "compose", to_string = "https://www.googleapis.com/auth/gmail.compose")]
    Compose,
    #[strum(serialize = "send", to_string = "https://www.googleapis.com/auth/gmail.send")]
    Send,
    #[strum(serialize = "insert", to_string = "https://www.googleapis.com/auth/gmail.insert")]
    Insert,
    #[strum(serialize = "labels", to_string = "https://www.googleapis.com/auth/gmail.labels")]
    Labels,
    #[strum(serialize = "metadata", to_string = "https://www.googleapis.com/auth/gmail.metadata")]
    Metadata,
    #[strum(serialize = "modify", to_string = "https://www.googleapis.com/auth/gmail.modify")]
    Modify,
    #[strum(
        serialize = "settings-basic",
        to_string = "https://www.googleapis.com/auth/gmail.settings.basic"
    )]
    SettingsBasic,
    #[strum(
        serialize = "settings-sharing",
        to_string = "https://www.googleapis.com/auth/gmail.settings.sharing"
    )]
    SettingsSharing,
    /// Full mailbox access, including permanent deletion.
    #[strum(serialize = "full-access", serialize = "mail", to_string = "https://mail.google.com/")]
    FullAccess,
    #[strum(
        serialize = "addons-current-message-metadata",
        to_string = "https://www.googleapis.com/auth/gmail.addons.current.message.metadata"
    )]
    AddonsCurrentMessageMetadata,
    #[strum(
        serialize = "addons-current-message-readonly",
        to_string = "https://www.googleapis.com/auth/gmail.addons.current.message.readonly"
    )]
    AddonsCurrentMessageReadonly,
    #[strum(
        serialize = "addons-current-message-action",
        to_string = "https://www.googleapis.com/auth/gmail.addons.current.message.action"
    )]
    AddonsCurrentMessageAction,
    #[strum(
        serialize = "addons-current-action-compose",
        to_string = "https://www.googleapis.com/auth/gmail.addons.current.action.compose"
    )]
    AddonsCurrentActionCompose,
}

impl Scope {
    pub const ALL: [Scope; 14] = [
        Self::Readonly,
        Self::Compose,
        Self::Send,
        Self::Insert,
        Self::Labels,
        Self::Metadata,
        Self::Modify,
        Self::SettingsBasic,
        Self::SettingsSharing,
        Self::FullAccess,
        Self::AddonsCurrentMessageMetadata,
        Self::AddonsCurrentMessageReadonly,
        Self::AddonsCurrentMessageAction,
        Self::AddonsCurrentActionCompose,
    ];

    /// Scope URL as sent in the authorization request.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readonly => GMAIL_READONLY,
            Self::Compose => GMAIL_COMPOSE,
            Self::Send => GMAIL_SEND,
            Self::Insert => GMAIL_INSERT,
            Self::Labels => GMAIL_LABELS,
            Self::Metadata => GMAIL_METADATA,
            Self::Modify => GMAIL_MODIFY,
            Self::SettingsBasic => GMAIL_SETTINGS_BASIC,
            Self::SettingsSharing => GMAIL_SETTINGS_SHARING,
            Self::FullAccess => MAIL_GOOGLE_COM,
            Self::AddonsCurrentMessageMetadata => GMAIL_ADDONS_CURRENT_MESSAGE_METADATA,
            Self::AddonsCurrentMessageReadonly => GMAIL_ADDONS_CURRENT_MESSAGE_READONLY,
            Self::AddonsCurrentMessageAction => GMAIL_ADDONS_CURRENT_MESSAGE_ACTION,
            Self::AddonsCurrentActionCompose => GMAIL_ADDONS_CURRENT_ACTION_COMPOSE,
        }
    }
}

impl AsRef<str> for Scope {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
