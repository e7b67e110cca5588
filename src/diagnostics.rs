//! Unified, `miette`-based diagnostics for the Iridium toolchain.
//!
//! Every failure produced by the passage parser and by the surrounding project
//! tooling (store, bundler, runner) is an [`IridiumError`]. Parse errors carry a
//! byte [`Span`] and, once the caller attaches it, the passage text so the CLI
//! can render a labelled snippet.
//!
//! # Error Construction Macros
//!
//! - `err_msg!(Io, "cannot read {}", path)` for message-only errors.
//! - `err_span!(Structural, span, "extra junk after {} name", "option")` for
//!   errors located in the passage source.
//!
//! The source text is never threaded through the scanner or parser. Attach it
//! once with [`IridiumError::with_source`] at the boundary that owns the text.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// Type-safe classification of [`IridiumError`] variants, mainly for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Characters the scanner cannot classify
    Lexical,
    /// Malformed or unknown directives
    Structural,
    /// Options or annotations still open at end of input
    Unterminated,
    /// Filesystem and terminal failures
    Io,
    /// Project configuration and layout problems
    Config,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Lexical => "lexical",
            ErrorType::Structural => "structural",
            ErrorType::Unterminated => "unterminated",
            ErrorType::Io => "io",
            ErrorType::Config => "config",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an error happened and how to help.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_span(span: Span) -> Self {
        Self {
            source: None,
            span: Some(span),
            help: None,
        }
    }
}

/// The single error type of the crate.
#[derive(Debug, Error)]
pub enum IridiumError {
    #[error("Lexical error: {message}")]
    Lexical {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Structural error: {message}")]
    Structural {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Unterminated construct: {message}")]
    Unterminated {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl IridiumError {
    fn ctx(&self) -> &ErrorContext {
        match self {
            IridiumError::Lexical { ctx, .. }
            | IridiumError::Structural { ctx, .. }
            | IridiumError::Unterminated { ctx, .. }
            | IridiumError::Io { ctx, .. }
            | IridiumError::Config { ctx, .. } => ctx,
        }
    }

    fn ctx_mut(&mut self) -> &mut ErrorContext {
        match self {
            IridiumError::Lexical { ctx, .. }
            | IridiumError::Structural { ctx, .. }
            | IridiumError::Unterminated { ctx, .. }
            | IridiumError::Io { ctx, .. }
            | IridiumError::Config { ctx, .. } => ctx,
        }
    }

    /// The bare message, without the category prefix of `Display`.
    pub fn message(&self) -> &str {
        match self {
            IridiumError::Lexical { message, .. }
            | IridiumError::Structural { message, .. }
            | IridiumError::Unterminated { message, .. }
            | IridiumError::Io { message, .. }
            | IridiumError::Config { message, .. } => message,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            IridiumError::Lexical { .. } => ErrorType::Lexical,
            IridiumError::Structural { .. } => ErrorType::Structural,
            IridiumError::Unterminated { .. } => ErrorType::Unterminated,
            IridiumError::Io { .. } => ErrorType::Io,
            IridiumError::Config { .. } => ErrorType::Config,
        }
    }

    pub fn span(&self) -> Option<Span> {
        self.ctx().span
    }

    /// Attaches the named source text the span points into.
    pub fn with_source(mut self, name: impl AsRef<str>, text: impl AsRef<str>) -> Self {
        self.ctx_mut().source = Some(Arc::new(NamedSource::new(
            name.as_ref(),
            text.as_ref().to_string(),
        )));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.ctx_mut().help = Some(help.into());
        self
    }

    /// Wraps a filesystem error, keeping it as the diagnostic cause.
    pub fn io(message: impl Into<String>, cause: std::io::Error) -> Self {
        IridiumError::Io {
            message: message.into(),
            ctx: ErrorContext::none(),
            source: Some(Box::new(cause)),
        }
    }
}

impl Diagnostic for IridiumError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("iridium::{}", self.error_type())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let ctx = self.ctx();
        // A label without source text has nothing to point into.
        ctx.source.as_ref()?;
        let span = ctx.span?;
        let label = LabeledSpan::new(Some(self.message().to_string()), span.start, span.len());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Constructs an [`IridiumError`] variant with a formatted message and no location.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $($arg:tt)+) => {
        $crate::IridiumError::$variant {
            message: format!($($arg)+),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
}

/// Constructs an [`IridiumError`] variant located at a [`Span`] of the passage source.
#[macro_export]
macro_rules! err_span {
    ($variant:ident, $span:expr, $($arg:tt)+) => {
        $crate::IridiumError::$variant {
            message: format!($($arg)+),
            ctx: $crate::ErrorContext::with_span($span),
            source: None,
        }
    };
}

/// Prints an error with full miette diagnostics on stderr.
pub fn print_error(error: IridiumError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
