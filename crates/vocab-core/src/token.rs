/// Prefix of the chat command that redeems a save-token
pub const SAVE_PREFIX: &str = "/save_";

const TOKEN_LEN: usize = 8;

/// Fresh save-token, e.g. `/save_3f9a01bc`
pub fn new_save_token() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{SAVE_PREFIX}{}", &id[..TOKEN_LEN])
}

/// Extract the save-token from an inbound message, if it is a save action.
///
/// Group chats may append the bot name (`/save_abc@vocab_bot`), which is cut off.
pub fn parse_save_token(text: &str) -> Option<&str> {
    let text = text.trim();
    let rest = text.strip_prefix(SAVE_PREFIX)?;
    let end = rest.find('@').unwrap_or(rest.len());
    if end == 0 || !rest[..end].chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(&text[..SAVE_PREFIX.len() + end])
}
