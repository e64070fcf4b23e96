use ChemBalance::Utils::logger::init_logger;
use ChemBalance::cli::cli_main::run_interactive_menu;
use ChemBalance::settings::BalancerSettings;
use log::{error, info, warn};

pub fn main() {
    let settings = match BalancerSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("cannot read settings, using defaults: {}", e);
            BalancerSettings::default()
        }
    };
    init_logger(settings.level_filter());
    if settings.parsed_log_level().is_none() {
        warn!("unknown log level '{}', using info", settings.log_level);
    }
    info!("settings: {:?}", settings);

    match settings.atomic_weight_table() {
        Ok(weights) => run_interactive_menu(&settings, &weights),
        Err(e) => error!("cannot load atomic weight table: {}", e),
    }
}
