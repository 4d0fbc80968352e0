//! Error handling utilities for MCP server

use harbor_core::CoordinatorError;
use rmcp::ErrorData;

/// Helper to convert coordinator errors to MCP errors
pub fn to_mcp_error(message: &str, error: &CoordinatorError) -> ErrorData {
    ErrorData::internal_error(format!("{}: {}", message, error), None)
}
