//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the standard error types of the
//! library and CLI and miette's rich diagnostic formatting.
//!
//! Every error kind gets its own diagnostic code, e.g.
//! `tensordraw::layout::bond_mismatch`. Description parse errors carry the
//! input text and a label at the offending span.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use tensordraw::{LayoutError, TensorDrawError};

use crate::{config::ConfigError, error::CliError};

/// Adapter for a description parse error with source text.
pub struct DescriptionAdapter<'a> {
    err: &'a CliError,
    message: &'a str,
    span: Option<SourceSpan>,
    src: &'a str,
}

impl fmt::Debug for DescriptionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptionAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for DescriptionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DescriptionAdapter<'_> {}

impl MietteDiagnostic for DescriptionAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("tensordraw::description"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "each [[element]] needs `kind = \"node\"` or `kind = \"chain\"` and a `name`",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(self.message.to_string()),
            span,
        ))))
    }
}

/// Adapter for errors without source text.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Config(_) => "tensordraw::config",
            CliError::Io(_) => "tensordraw::io",
            CliError::Description { .. } => "tensordraw::description",
            CliError::TensorDraw(TensorDrawError::Layout(err)) => layout_code(err),
            CliError::TensorDraw(TensorDrawError::Export(_)) => "tensordraw::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Config(ConfigError::MissingFile(_)) => {
                "check the path given with --config"
            }
            CliError::Config(ConfigError::Validation(_)) => {
                "sizes and pitches must be positive, lengths and gaps non-negative"
            }
            CliError::TensorDraw(TensorDrawError::Layout(err)) => layout_help(err)?,
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

fn layout_code(err: &LayoutError) -> &'static str {
    match err {
        LayoutError::NameCollision { .. } => "tensordraw::layout::name_collision",
        LayoutError::BondMismatch { .. } => "tensordraw::layout::bond_mismatch",
        LayoutError::InvalidLegCount { .. } => "tensordraw::layout::invalid_leg_count",
        LayoutError::InvalidName { .. } => "tensordraw::layout::invalid_name",
        LayoutError::NotFound { .. } => "tensordraw::layout::not_found",
        LayoutError::InvalidChainLength { .. } => "tensordraw::layout::invalid_chain_length",
        LayoutError::SiteOutOfRange { .. } => "tensordraw::layout::site_out_of_range",
        LayoutError::InvalidDimension { .. } => "tensordraw::layout::invalid_dimension",
    }
}

fn layout_help(err: &LayoutError) -> Option<&'static str> {
    let help = match err {
        LayoutError::NameCollision { .. } => {
            "tensor and chain site names must be unique within one diagram"
        }
        LayoutError::BondMismatch { .. } => {
            "the east leg count of each chain site must equal the west leg count of the next"
        }
        LayoutError::InvalidLegCount { .. } => "leg counts must be between 0 and 1024 per side",
        LayoutError::InvalidName { .. } => {
            "names must be non-empty and must not contain `.`, which separates anchor parts"
        }
        LayoutError::InvalidChainLength { .. } => "a chain needs a `length` between 1 and 4096",
        LayoutError::SiteOutOfRange { .. } => {
            "site indices start at 1 and end at the chain length"
        }
        LayoutError::InvalidDimension { .. } => {
            "sizes and pitches must be positive, lengths and gaps non-negative"
        }
        LayoutError::NotFound { .. } => return None,
    };
    Some(help)
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error pointing into the input description.
    Description(DescriptionAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Description(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Description(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Description(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Description(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Description(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Description(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Description {
            message, span, src, ..
        } => vec![Reportable::Description(DescriptionAdapter {
            err,
            message,
            span: span
                .as_ref()
                .map(|range| SourceSpan::new(range.start.into(), range.len())),
            src,
        })],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
