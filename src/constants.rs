pub mod limits {

    pub const TITLE_MAX_CHARS: usize = 60;

    pub const YEAR_MAX_CHARS: usize = 4;

    pub const NAME_MAX_CHARS: usize = 20;
}

/// Credentials written by the initial migration.
pub mod bootstrap {

    pub const USERNAME: &str = "admin";

    pub const PASSWORD: &str = "password";

    pub const NAME: &str = "Admin";
}

pub mod session {

    pub const USER_ID_KEY: &str = "user_id";

    pub const NOTICE_KEY: &str = "notice";

    pub const DEFAULT_EXPIRY_MINUTES: i64 = 60;
}

pub mod notices {

    pub const INVALID_INPUT: &str = "Invalid input.";

    pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

    pub const ITEM_CREATED: &str = "Item created.";

    pub const ITEM_UPDATED: &str = "Item updated.";

    pub const ITEM_DELETED: &str = "Item deleted.";

    pub const LOGIN_SUCCESS: &str = "Login success.";

    pub const GOODBYE: &str = "Goodbye.";

    pub const SETTINGS_UPDATED: &str = "Setting updated.";
}
