use crate::capability::InterfaceId;
use crate::heap::AllocKind;
use thiserror::Error;

/// Structured error context attached to provider failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Additional context about the error (e.g., requested size, handle instance)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "factory", "query_capability")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            details: None,
            source: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors produced while creating or negotiating with a lobby provider.
///
/// Only two failure classes exist: the heap refused an allocation, or the caller
/// asked for an operation set this provider does not implement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Out of memory allocating {kind}{}", format_context(.context))]
    OutOfMemory {
        kind: AllocKind,
        context: ErrorContext,
    },

    #[error("Unsupported capability {id}{}", format_context(.context))]
    UnsupportedCapability {
        id: InterfaceId,
        context: ErrorContext,
    },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn out_of_memory(kind: AllocKind, context: ErrorContext) -> Self {
        Error::OutOfMemory { kind, context }
    }

    pub fn unsupported_capability(id: InterfaceId, context: ErrorContext) -> Self {
        Error::UnsupportedCapability { id, context }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Error::OutOfMemory { context, .. } | Error::UnsupportedCapability { context, .. } => {
                context
            }
        }
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Error::OutOfMemory { .. })
    }

    pub fn is_unsupported_capability(&self) -> bool {
        matches!(self, Error::UnsupportedCapability { .. })
    }
}
