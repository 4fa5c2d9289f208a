pub mod error;
pub mod headers;
pub mod identifier;
pub mod literal;
pub mod offers;
pub mod page;
pub mod pipeline;
pub mod product;
pub mod session;
pub mod sink;
pub mod token;

pub use error::{IdentifierMiss, PipelineStage, RequestError, ScraperError, TokenMiss};
pub use identifier::extract_identifier;
pub use literal::object_literals;
pub use offers::{build_offers_url, generate_session_id, request_offers};
pub use page::fetch_page;
pub use pipeline::{OfferPipeline, OfferReport};
pub use product::ProductReference;
pub use session::Session;
pub use sink::{JsonFileSink, OfferSink};
pub use token::{token_from_bundle, TokenLocator};
