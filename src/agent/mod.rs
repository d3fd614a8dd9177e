//! Agent system for intelligent task execution with tool calling.
//!
//! Provides an LLM agent that can use the full toolkit to research
//! channels, analyze videos, score thumbnails, estimate views, and
//! extract talent rosters, deciding its own tool sequence per task.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
