// Salary prediction: prompt rendering and the streaming relay to the client.
// All LLM calls go through llm_client; nothing here talks to Anthropic directly.

pub mod handlers;
pub mod prompts;
pub mod relay;
