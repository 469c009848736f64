use std::io::IsTerminal;
use std::sync::OnceLock;

use th_config::TailConfig;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags, config: &TailConfig) {
    let _ = UI_PREFS.set(resolve(flags, config, std::io::stdout().is_terminal()));
}

fn resolve(flags: &GlobalFlags, config: &TailConfig, is_tty: bool) -> UiPrefs {
    let table = flags.format == OutputFormat::Table;
    let table_color = match flags.color {
        ColorMode::Always => table,
        ColorMode::Never => false,
        ColorMode::Auto => {
            is_tty
                && table
                && !flags.quiet
                && config.display.color
                && std::env::var_os("NO_COLOR").is_none()
        }
    };

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use th_config::TailConfig;

    use super::resolve;
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            page_size: None,
            quiet: false,
            verbose: false,
            project: None,
            color,
        }
    }

    #[test]
    fn always_colors_tables_only() {
        let config = TailConfig::default();
        assert!(resolve(&flags(OutputFormat::Table, ColorMode::Always), &config, false).table_color);
        assert!(!resolve(&flags(OutputFormat::Json, ColorMode::Always), &config, true).table_color);
    }

    #[test]
    fn never_disables_color() {
        let config = TailConfig::default();
        assert!(!resolve(&flags(OutputFormat::Table, ColorMode::Never), &config, true).table_color);
    }

    #[test]
    fn auto_respects_display_config_and_tty() {
        let mut config = TailConfig::default();
        assert!(!resolve(&flags(OutputFormat::Table, ColorMode::Auto), &config, false).table_color);

        config.display.color = false;
        assert!(!resolve(&flags(OutputFormat::Table, ColorMode::Auto), &config, true).table_color);
    }
}
