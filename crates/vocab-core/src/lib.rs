pub mod cache;
pub mod dictionary;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod markup;
pub mod output;
pub mod preprocess;
pub mod render;
pub mod token;
pub mod trainer;

pub use cache::TokenCache;
pub use dictionary::{Dictionary, Provider};
pub use error::{FetchError, LookupError, ParseError, TokenNotFound};
pub use fetch::{FetchMethod, FetchRequest, Fetcher};
pub use lookup::DictionaryService;
pub use output::OutputBuilder;
pub use render::Renderer;
