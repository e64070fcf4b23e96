use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Installs a terminal logger at the given level. Returns false when a logger was
/// already installed; the installed logger and the global max level stay as they were.
pub fn init_logger(level: LevelFilter) -> bool {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();
    let logger = TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto);
    // max level is raised only once the logger is actually in place
    match log::set_boxed_logger(logger) {
        Ok(()) => {
            log::set_max_level(level);
            true
        }
        Err(_) => false,
    }
}
