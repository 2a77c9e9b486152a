mod extractor_factory;
mod mock_text_extractor;
mod pdf_text_adapter;

pub use extractor_factory::TextExtractorFactory;
pub use mock_text_extractor::{MOCK_RESUME_TEXT, MockTextExtractor};
pub use pdf_text_adapter::{PdfTextAdapter, join_page_texts};
