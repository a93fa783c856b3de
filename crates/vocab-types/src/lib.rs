pub mod model;
pub mod types;

pub use model::{
    DictionaryResponse, Entry, Fragment, Lexeme, OutputBlock, Pronunciation, SaveBinding,
    SenseDefinition, TrainingUnit,
};
pub use types::{AppEvent, IncomingMessage};
