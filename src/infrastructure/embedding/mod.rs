mod hf;

pub use hf::HfEmbedding;
