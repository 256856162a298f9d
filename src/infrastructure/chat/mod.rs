mod groq;

pub use groq::GroqChat;
