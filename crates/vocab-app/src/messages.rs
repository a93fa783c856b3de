//! Fixed user-facing replies.

pub use vocab_core::output::NOTHING_FOUND;

pub const FAILED: &str = "Failed processing request ... \u{1f914}";

pub const TOKEN_NOT_FOUND: &str =
    "Cannot find corresponding dictionary request, please repeat it ... \u{1f61e}";

pub const NO_TRAINING_DATA: &str = "Seems like you have no training data yet ... \u{1f61e}";

pub const TRAINING_SET_FILE: &str = "training_set.txt";

pub const HELP: &str = "Send me an English word or phrase and I'll look it up.\n\
\n\
Tap the /save_... command under a definition to keep it for training.\n\
/history sends your saved definitions as a file.";

pub fn stored(item: &str) -> String {
    format!("Stored '{item}' definition \u{2705}")
}
