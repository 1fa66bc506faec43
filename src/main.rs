use std::path::PathBuf;
use std::sync::Arc;

use autoclip::app::{self, RunOptions};
use autoclip::config::{self, Config, ConfigStore};
use autoclip::logging;

fn print_help() {
    println!("autoclip {}", env!("CARGO_PKG_VERSION"));
    println!("Reads new clipboard text aloud\n");
    println!("USAGE:");
    println!("    autoclip [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --config <path>   Use this config file instead of the default");
    println!("    --enable          Start reading immediately");
    println!("    --secure          Never auto-start from the remembered state");
    println!("    --print-config    Print the default configuration to stdout");
    println!("    --version, -V     Print version information");
    println!("    --help, -h        Print this help message");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-config") {
        match toml::to_string_pretty(&Config::default()) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("autoclip {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => PathBuf::from(path),
            None => {
                eprintln!("error: --config needs a path");
                std::process::exit(2);
            }
        },
        None => config::config_path(),
    };
    let options = RunOptions {
        enable: args.iter().any(|a| a == "--enable"),
        secure: args.iter().any(|a| a == "--secure"),
    };

    std::panic::set_hook(Box::new(|info| {
        log::error!("panic: {info}");
        eprintln!("autoclip panicked: {info}");
    }));

    let store = ConfigStore::open(config_path);
    if let Err(e) = logging::init(store.config().log.level_filter()) {
        eprintln!("warning: debug log unavailable: {e}");
    }
    log::info!(
        "starting autoclip {} with {}",
        env!("CARGO_PKG_VERSION"),
        store.path().display()
    );

    if let Err(e) = app::run(Arc::new(store), options) {
        log::error!("autoclip: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
