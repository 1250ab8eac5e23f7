//! CLI logic for the tensordraw diagram tool.
//!
//! Reads a TOML diagram description, lays it out with the configured
//! defaults and writes SVG or a command listing.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::{Args, OutputFormat};
pub use config::ConfigError;
pub use error::CliError;

use std::fs;

use log::info;

use tensordraw::{DiagramBuilder, description::DiagramDescription};

/// Run the tensordraw CLI application
///
/// This function processes the input description through the layout
/// pipeline and writes the rendered output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed descriptions
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format;
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and parse the description
    let source = fs::read_to_string(&args.input)?;
    let description: DiagramDescription = toml::from_str(&source)
        .map_err(|err| CliError::new_description_error(&err, &args.input, &source))?;

    // Lay out and render using the DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.build(&description)?;
    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&diagram)?,
        OutputFormat::Listing => builder.render_listing(&diagram)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
