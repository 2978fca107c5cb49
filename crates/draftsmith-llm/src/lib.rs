pub mod types;
pub mod traits;
pub mod openai;

pub use traits::{
    GenerationClient,
    GenerationRequest, GenerationResponse, GenerationOptions,
    ResponseSchema, TokenUsage,
};

pub use openai::OpenAIClient;
pub use types::Message;
