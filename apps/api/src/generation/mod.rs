// CV rewriting through the remote generation collaborator.
// All LLM calls go through llm_client; this module owns the prompt and the
// interpretation of the returned JSON.

pub mod generator;
pub mod handlers;
pub mod prompts;
