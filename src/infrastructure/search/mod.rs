//! Fallback search infrastructure

mod tool_server;

pub use tool_server::ToolServerSearch;
