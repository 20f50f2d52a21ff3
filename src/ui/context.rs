use docpub::config::{ColorMode, Config, Verbosity};

use crate::cli::ColorWhen;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub verbosity: Verbosity,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(verbose: u8, cli_color: Option<ColorWhen>, config: &Config) -> Self {
        Self::from_caps(verbose, cli_color, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        verbose: u8,
        cli_color: Option<ColorWhen>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        Self {
            verbosity: config.output.verbosity.with_flag_count(verbose),
            color,
            unicode,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}
