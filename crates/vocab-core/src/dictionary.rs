use vocab_types::DictionaryResponse;

use crate::error::ParseError;
use crate::fetch::FetchRequest;

/// A dictionary web service with its own native response shape
pub trait Provider: Send + Sync {
    /// Provider-native tree decoded from the raw bytes
    type Response;

    /// Short provider name used in logs and errors
    fn name(&self) -> &'static str;

    /// Build the request for a lookup term
    fn request(&self, term: &str) -> FetchRequest;

    /// Decode raw bytes, leaving markup tokens untouched
    fn parse(&self, bytes: &[u8]) -> Result<Self::Response, ParseError>;

    /// Map the native tree onto the canonical model. Never fails.
    fn normalize(&self, response: Self::Response) -> DictionaryResponse;
}

/// Object-safe view of a [`Provider`], so several can be queried in turn
pub trait Dictionary: Send + Sync {
    fn name(&self) -> &'static str;

    fn request(&self, term: &str) -> FetchRequest;

    fn decode(&self, bytes: &[u8]) -> Result<DictionaryResponse, ParseError>;
}

impl<P: Provider> Dictionary for P {
    fn name(&self) -> &'static str {
        Provider::name(self)
    }

    fn request(&self, term: &str) -> FetchRequest {
        Provider::request(self, term)
    }

    fn decode(&self, bytes: &[u8]) -> Result<DictionaryResponse, ParseError> {
        let native = self.parse(bytes)?;
        Ok(self.normalize(native))
    }
}
